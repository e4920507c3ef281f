//! Lowering from parsed sources to core definitions.
//!
//! The parsers in [`crate::parser`] stop at names and literals. The
//! compilers here resolve names against a [`overboard_core::KeyVocabulary`],
//! expand string escapes and produce the [`overboard_core::LayoutDefinition`]
//! and [`overboard_core::ComposeSequence`] values the core crate validates.

mod layout;
mod sequence;

pub use layout::LayoutCompiler;
pub use sequence::SequenceCompiler;

use overboard_core::Error;

/// Expands backslash escapes inside a quoted string literal.
///
/// Recognized escapes are `\n`, `\r`, `\t`, `\\`, `\"`, `\'` and
/// `\uXXXX`. An unrecognized escape passes through with its backslash.
pub(crate) fn process_string_escapes(s: &str, line: usize) -> Result<String, Error> {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 {
                        return Err(Error::Parse {
                            line,
                            message: "incomplete \\u escape, expected four hex digits".to_string(),
                        });
                    }
                    let code = u32::from_str_radix(&hex, 16).map_err(|_| Error::Parse {
                        line,
                        message: format!("invalid unicode escape '\\u{}'", hex),
                    })?;
                    result.push(unicode_char(code, line)?);
                }
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Converts a `UXXXX` literal to a char, rejecting surrogate values.
pub(crate) fn unicode_char(code: u32, line: usize) -> Result<char, Error> {
    char::from_u32(code).ok_or_else(|| Error::Parse {
        line,
        message: format!("U{:04X} is not a valid unicode scalar", code),
    })
}
