use overboard_core::Error;

use crate::lexer::{extract_options, Lexer, Token};

use super::ast::{KeyDecl, LayoutFile, MappingDecl, RowDecl, StateExpr, ValueExpr};

/// Recursive-descent parser for `.obl` layout sources. One layout per
/// file; syntax only, name resolution happens in the compiler.
pub struct LayoutParser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token>,
    pending_error: Option<Error>,
}

impl<'a> LayoutParser<'a> {
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

    pub fn parse(&mut self) -> Result<LayoutFile, Error> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let options = extract_options(self.lexer.input);

        self.expect(Token::Layout)?;
        let id = self.expect_string("layout identifier")?;

        let extends = if self.current == Some(Token::Extends) {
            self.advance()?;
            Some(self.expect_string("base layout identifier")?)
        } else {
            None
        };

        self.expect(Token::LBrace)?;

        let mut states = Vec::new();
        let mut rows = Vec::new();
        loop {
            match &self.current {
                Some(Token::States) => {
                    if !states.is_empty() {
                        return Err(Error::Parse {
                            line: self.lexer.current_line(),
                            message: "duplicate states declaration".to_string(),
                        });
                    }
                    states = self.parse_states()?;
                }
                Some(Token::Row) => {
                    rows.push(self.parse_row()?);
                }
                Some(Token::RBrace) => {
                    self.advance()?;
                    break;
                }
                other => {
                    return Err(Error::Parse {
                        line: self.lexer.current_line(),
                        message: format!("expected 'states', 'row' or '}}', found {:?}", other),
                    });
                }
            }
        }

        if let Some(token) = &self.current {
            return Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("unexpected content after layout block: {:?}", token),
            });
        }

        Ok(LayoutFile {
            options,
            id,
            extends,
            states,
            rows,
        })
    }

    fn advance(&mut self) -> Result<(), Error> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), Error> {
        if self.current.as_ref() != Some(&expected) {
            return Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("expected {:?}, found {:?}", expected, self.current),
            });
        }
        self.advance()
    }

    fn expect_string(&mut self, what: &str) -> Result<String, Error> {
        if let Some(Token::String(s)) = &self.current {
            let s = s.clone();
            self.advance()?;
            Ok(s)
        } else {
            Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("expected {} string, found {:?}", what, self.current),
            })
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, Error> {
        if let Some(Token::Identifier(name)) = &self.current {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!("expected {}, found {:?}", what, self.current),
            })
        }
    }

    fn parse_states(&mut self) -> Result<Vec<StateExpr>, Error> {
        self.expect(Token::States)?;
        self.expect(Token::Equals)?;
        self.expect(Token::LBracket)?;

        let mut states = Vec::new();
        loop {
            states.push(self.parse_state_expr()?);
            match &self.current {
                Some(Token::Comma) => self.advance()?,
                Some(Token::RBracket) => {
                    self.advance()?;
                    break;
                }
                other => {
                    return Err(Error::Parse {
                        line: self.lexer.current_line(),
                        message: format!("expected ',' or ']' in states list, found {:?}", other),
                    });
                }
            }
        }

        Ok(states)
    }

    fn parse_state_expr(&mut self) -> Result<StateExpr, Error> {
        let line = self.lexer.current_line();
        let mut names = vec![self.expect_identifier("modifier name")?];

        while self.current == Some(Token::Ampersand) {
            self.advance()?;
            names.push(self.expect_identifier("modifier name")?);
        }

        Ok(StateExpr { names, line })
    }

    fn parse_row(&mut self) -> Result<RowDecl, Error> {
        self.expect(Token::Row)?;
        self.expect(Token::LBrace)?;

        let mut keys = Vec::new();
        while self.current == Some(Token::Key) {
            keys.push(self.parse_key()?);
        }

        self.expect(Token::RBrace)?;
        Ok(RowDecl { keys })
    }

    fn parse_key(&mut self) -> Result<KeyDecl, Error> {
        let line = self.lexer.current_line();
        self.expect(Token::Key)?;
        let position = self.expect_identifier("key position")?;
        self.expect(Token::LBrace)?;

        let mut mappings = Vec::new();
        while matches!(self.current, Some(Token::Identifier(_))) {
            mappings.push(self.parse_mapping()?);
        }

        self.expect(Token::RBrace)?;

        Ok(KeyDecl {
            position,
            mappings,
            line,
        })
    }

    fn parse_mapping(&mut self) -> Result<MappingDecl, Error> {
        let line = self.lexer.current_line();
        let state = self.parse_state_expr()?;
        self.expect(Token::Equals)?;
        let value = self.parse_value()?;

        Ok(MappingDecl { state, value, line })
    }

    fn parse_value(&mut self) -> Result<ValueExpr, Error> {
        match &self.current {
            Some(Token::String(s)) => {
                let value = ValueExpr::String(s.clone());
                self.advance()?;
                Ok(value)
            }
            Some(Token::Unicode(Some(code))) => {
                let value = ValueExpr::Unicode(*code);
                self.advance()?;
                Ok(value)
            }
            Some(Token::Identifier(name)) => {
                let value = ValueExpr::Name(name.clone());
                self.advance()?;
                Ok(value)
            }
            other => Err(Error::Parse {
                line: self.lexer.current_line(),
                message: format!(
                    "expected mapping value (string, unicode or name), found {:?}",
                    other
                ),
            }),
        }
    }
}
