use super::ast::Ast;
use super::token::{Pos, Token, TokenKind};
use crate::error::Error;
use std::iter::Peekable;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    last: Pos,
    pub(super) ast: Ast,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
            last: Pos::default(),
            ast: Ast::default(),
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Skip comments
    fn skip(&mut self) {
        while let Some(token) = self.tokens.peek() {
            match &token.kind {
                TokenKind::Comment => self.tokens.next(),
                _ => break,
            };
        }
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip();
        self.tokens.peek()
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.skip();
        let token = self.tokens.next();
        if let Some(token) = &token {
            self.last = token.pos;
        }
        token
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.skip();
        self.tokens.peek().is_some_and(cond)
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        self.skip();
        let token = self.tokens.next_if(|token| cond(token));
        if let Some(token) = &token {
            self.last = token.pos;
        }
        token
    }

    /// Next token must be match with condition (skipping comments)
    pub fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        expected: &str,
        cond: F,
    ) -> Result<Token, Error> {
        match self.consume_if(cond) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    /// Error for the next token, which does not fit `expected`.
    pub fn unexpected(&mut self, expected: &str) -> Error {
        let last = self.last;
        match self.peek() {
            Some(token) if token.kind == TokenKind::Error => Error::InvalidCharacter {
                ch: token.spelling.clone(),
                pos: token.pos,
            },
            Some(token) => Error::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
                pos: token.pos,
            },
            None => Error::UnexpectedToken {
                expected: expected.to_string(),
                found: "end of file".to_string(),
                pos: last,
            },
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:ident) => {
        $parser.expect_tobe(
            &$crate::grammer::token::TokenKind::$kind.describe(),
            |token| token.kind == $crate::grammer::token::TokenKind::$kind,
        )
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:ident, $following:expr) => {
        if check!($parser, $trigger) {
            expect!($parser, $trigger)?;
            Some($following)
        } else {
            None
        }
    };
    ($parser:expr, $trigger:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $trigger))
    };
}

/// Parse repeated elements with optional delimiters
/// 3 args: { element } terminal (no delimiter)
/// 4 args: [ element { delimiter element } ] terminal (with delimiter)
#[macro_export]
macro_rules! repeat {
    // Without delimiter: { element } terminal
    ($parser:expr, $elem:expr, $terminal:pat) => {{
        let mut items = Vec::new();
        while !check!($parser, $terminal) {
            items.push($elem?);
        }
        items
    }};

    // With delimiter: [ element { delimiter element } ] terminal
    ($parser:expr, $elem:expr, $delimiter:ident, $terminal:pat) => {{
        let mut items = Vec::new();
        if !check!($parser, $terminal) {
            items.push($elem?);
            while check!($parser, $delimiter) {
                expect!($parser, $delimiter)?;
                items.push($elem?);
            }
        }
        items
    }};
}
