use logos::{Lexer as LogosLexer, Logos};
use overboard_core::Error;

use super::Token;

/// Lexer wrapper that tracks line numbers for diagnostics.
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    current_line: usize,
    pub input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            current_line: 1,
            input,
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        // Update line number based on newlines in skipped content
        let before_pos = self.inner.span().start;

        match self.inner.next() {
            Some(Ok(token)) => {
                // Count newlines in the span between tokens
                let span_text = &self.input[before_pos..self.inner.span().start];
                self.current_line += span_text.chars().filter(|&c| c == '\n').count();
                Ok(Some(token))
            }
            Some(Err(_)) => {
                let span = self.inner.span();
                let span_text = &self.input[before_pos..span.start];
                self.current_line += span_text.chars().filter(|&c| c == '\n').count();
                let text = &self.input[span.start..span.end];
                Err(Error::Parse {
                    line: self.current_line,
                    message: format!("unexpected token: '{}'", text),
                })
            }
            None => Ok(None),
        }
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn peek(&self) -> Option<Token> {
        self.inner.clone().next().and_then(|r| r.ok())
    }
}

/// Collect `@KEY = "VALUE"` metadata from every comment in a source file.
/// Later occurrences of a key override earlier ones.
pub fn extract_options(input: &str) -> std::collections::HashMap<String, String> {
    let mut options = std::collections::HashMap::new();

    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        match rest[start..].find("*/") {
            Some(end) => {
                let comment = &rest[start..start + end + 2];
                for (key, value) in parse_options_from_comment(comment) {
                    options.insert(key, value);
                }
                rest = &rest[start + end + 2..];
            }
            None => break,
        }
    }

    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") && trimmed.contains('@') {
            for (key, value) in parse_options_from_comment(trimmed) {
                options.insert(key, value);
            }
        }
    }

    options
}

/// Extract `@KEY = "VALUE"` metadata from a comment block or line.
pub fn parse_options_from_comment(comment: &str) -> Vec<(String, String)> {
    let mut options = Vec::new();

    let content = comment
        .trim_start_matches("/*")
        .trim_end_matches("*/")
        .trim();

    for line in content.lines() {
        let line = line.trim();
        if let Some(at_pos) = line.find('@') {
            let line = &line[at_pos + 1..];
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..]
                    .trim()
                    .trim_matches('"')
                    .trim_matches('\'');
                options.push((key.to_string(), value.to_string()));
            }
        }
    }

    options
}
