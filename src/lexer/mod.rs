// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::AsonError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    /// Bare word that is not a recognised constant; the parser rejects it with a hint.
    Ident(String),

    // --- structure ---
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,

    Eof,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Whitespace, newlines and `#` comments are insignificant in the literal notation.
    pub fn next_token(&mut self) -> Result<Token, AsonError> {
        tokenizer::next_token(self)
    }
}
