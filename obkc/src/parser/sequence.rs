use overboard_core::Error;

use crate::lexer::{extract_options, Lexer, Token};

use super::ast::{ChainElement, OutputPiece, SequenceFile, SequenceRule};

/// Parser for `.seq` compose sources: one `chain => output` rule per
/// record.
pub struct SequenceParser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token>,
    pending_error: Option<Error>,
}

impl<'a> SequenceParser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let (current, pending_error) = match lexer.next_token() {
            Ok(token) => (token, None),
            Err(e) => (None, Some(e)),
        };

        Self {
            lexer,
            current,
            pending_error,
        }
    }

    pub fn parse(&mut self) -> Result<SequenceFile, Error> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let options = extract_options(self.lexer.input);

        let mut rules = Vec::new();
        while self.current.is_some() {
            rules.push(self.parse_rule()?);
        }

        Ok(SequenceFile { options, rules })
    }

    fn advance(&mut self) -> Result<(), Error> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn parse_rule(&mut self) -> Result<SequenceRule, Error> {
        let line = self.lexer.current_line();

        let mut chain = vec![self.parse_chain_element()?];
        while self.current == Some(Token::Plus) {
            self.advance()?;
            chain.push(self.parse_chain_element()?);
        }

        if self.current != Some(Token::Arrow) {
            return Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("expected '+' or '=>', found {:?}", self.current),
            });
        }
        self.advance()?;

        let mut output = vec![self.parse_output_piece()?];
        while self.current == Some(Token::Plus) {
            self.advance()?;
            output.push(self.parse_output_piece()?);
        }

        Ok(SequenceRule {
            chain,
            output,
            line,
        })
    }

    fn parse_chain_element(&mut self) -> Result<ChainElement, Error> {
        match &self.current {
            Some(Token::Identifier(name)) => {
                let element = ChainElement::Name(name.clone());
                self.advance()?;
                Ok(element)
            }
            Some(Token::String(s)) => {
                let element = ChainElement::String(s.clone());
                self.advance()?;
                Ok(element)
            }
            Some(Token::Unicode(Some(code))) => {
                let element = ChainElement::Unicode(*code);
                self.advance()?;
                Ok(element)
            }
            other => Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!(
                    "expected chain element (key name, string or unicode), found {:?}",
                    other
                ),
            }),
        }
    }

    fn parse_output_piece(&mut self) -> Result<OutputPiece, Error> {
        match &self.current {
            Some(Token::String(s)) => {
                let piece = OutputPiece::String(s.clone());
                self.advance()?;
                Ok(piece)
            }
            Some(Token::Unicode(Some(code))) => {
                let piece = OutputPiece::Unicode(*code);
                self.advance()?;
                Ok(piece)
            }
            other => Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("expected output string or unicode, found {:?}", other),
            }),
        }
    }
}
