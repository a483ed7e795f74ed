use crate::lexer::{Lexer, Token};
use crate::AsonError;
use crate::ast::{Document, Value, MAX_DEPTH};

mod value;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, AsonError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self { lexer, peek, depth: 0 })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, AsonError> {
        let curr = self.peek.take().ok_or(AsonError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        self.peek = Some(self.lexer.next_token()?);
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<Token, AsonError> {
        let token = self.bump()?;
        if token == Token::Eof {
            return Err(self.eof_error(&format!("Expected {:?}", expected)));
        }
        if token != expected {
            return Err(AsonError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, token),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        Ok(token)
    }

    pub(crate) fn eof_error(&self, message: &str) -> AsonError {
        AsonError::UnexpectedEof {
            message: message.into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: Some("Check for a missing closing '}' or ']'".into()),
            code: Some(201),
        }
    }

    pub(crate) fn enter(&mut self) -> Result<(), AsonError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(AsonError::SyntaxError {
                message: format!("Nesting deeper than {} levels", MAX_DEPTH),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Flatten the structure".into()),
                code: Some(211),
            });
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn column(&self) -> usize {
        self.lexer.column()
    }

    /// Parse a whole input whose top level is a mapping.
    pub fn parse_document(&mut self) -> Result<Document, AsonError> {
        let entries = match self.peek() {
            Some(Token::LBrace) => value::parse_object(self)?,
            Some(Token::Eof) | None => return Err(self.eof_error("Expected a top-level mapping")),
            Some(tok) => {
                return Err(AsonError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: self.line(),
                    column: self.column(),
                    hint: Some("A document must start with '{'".into()),
                    code: Some(205),
                });
            }
        };
        self.expect_end()?;
        Ok(Document::from(entries))
    }

    /// Parse a single value of any kind (used for standalone literals).
    pub fn parse_value(&mut self) -> Result<Value, AsonError> {
        let value = value::parse_value(self)?;
        self.expect_end()?;
        Ok(value)
    }

    fn expect_end(&mut self) -> Result<(), AsonError> {
        match self.peek() {
            Some(Token::Eof) | None => Ok(()),
            Some(tok) => Err(AsonError::InvalidToken {
                token: format!("{:?}", tok),
                line: self.line(),
                column: self.column(),
                hint: Some("Unexpected content after the end of the literal".into()),
                code: Some(206),
            }),
        }
    }
}
