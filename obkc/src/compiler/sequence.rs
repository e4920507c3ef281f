use overboard_core::{ComposeSequence, Error, KeyValue, KeyVocabulary};
use unicode_normalization::UnicodeNormalization;

use crate::parser::ast::{ChainElement, OutputPiece, SequenceFile, SequenceRule};

use super::{process_string_escapes, unicode_char};

/// Lowers parsed compose rules to [`ComposeSequence`] values.
///
/// A quoted string in a chain explodes into one `Char` element per
/// character. Outputs are concatenated and NFC-normalized, so `"e"` plus
/// `U0301` and the precomposed `"é"` compile to the same sequence.
pub struct SequenceCompiler<'a> {
    vocabulary: &'a KeyVocabulary,
}

impl<'a> SequenceCompiler<'a> {
    pub fn new(vocabulary: &'a KeyVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn compile(&self, file: &SequenceFile) -> Result<Vec<ComposeSequence>, Error> {
        file.rules
            .iter()
            .map(|rule| self.compile_rule(rule))
            .collect()
    }

    fn compile_rule(&self, rule: &SequenceRule) -> Result<ComposeSequence, Error> {
        let mut chain = Vec::new();
        for element in &rule.chain {
            match element {
                ChainElement::Name(name) => {
                    let value = self.vocabulary.resolve(name).map_err(|_| {
                        Error::InvalidSequence(format!(
                            "line {}: unknown key name '{}'",
                            rule.line, name
                        ))
                    })?;
                    chain.push(value);
                }
                ChainElement::String(s) => {
                    let text = process_string_escapes(s, rule.line)?;
                    if text.is_empty() {
                        return Err(Error::InvalidSequence(format!(
                            "line {}: empty string in chain",
                            rule.line
                        )));
                    }
                    chain.extend(text.chars().map(KeyValue::Char));
                }
                ChainElement::Unicode(code) => {
                    chain.push(KeyValue::Char(unicode_char(*code, rule.line)?));
                }
            }
        }

        let mut output = String::new();
        for piece in &rule.output {
            match piece {
                OutputPiece::String(s) => {
                    output.push_str(&process_string_escapes(s, rule.line)?);
                }
                OutputPiece::Unicode(code) => {
                    output.push(unicode_char(*code, rule.line)?);
                }
            }
        }
        if output.is_empty() {
            return Err(Error::InvalidSequence(format!(
                "line {}: empty output",
                rule.line
            )));
        }

        Ok(ComposeSequence {
            chain,
            output: output.nfc().collect(),
        })
    }
}
