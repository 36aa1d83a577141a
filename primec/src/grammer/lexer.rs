use super::token::{double_char_token, keyword, single_char_token, Pos, Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    row: usize,
    line_start: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            iter: code.char_indices().peekable(),
            row: 0,
            line_start: 0,
            finished: false,
        }
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn parse(self) -> Vec<Token> {
        self.collect()
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        let next = self.iter.next();
        if let Some((idx, '\n')) = next {
            self.row += 1;
            self.line_start = idx + 1;
        }
        next
    }

    fn pos(&self, offset: usize) -> Pos {
        Pos {
            offset,
            row: self.row,
            col: self.code[self.line_start..offset].chars().count(),
        }
    }

    /// End offset of the lexeme that started at `start`.
    fn cursor(&mut self) -> usize {
        self.iter.peek().map_or(self.code.len(), |&(idx, _)| idx)
    }
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Next token of the stream. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        while let Some((idx, ch0)) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos(idx);

            // 1. Double character token
            if let Some((_, ch1)) = self.peek_nth(1) {
                // Comment
                if ch0 == '/' && ch1 == '/' {
                    while self.iter.next_if(|&(_, c)| c != '\n').is_some() {}
                    let end = self.cursor();
                    return Token::new(TokenKind::Comment, &self.code[idx..end], pos);
                }

                if let Some(kind) = double_char_token(ch0, ch1) {
                    self.consume(); // consume
                    self.consume(); // consume second char
                    let end = self.cursor();
                    return Token::new(kind, &self.code[idx..end], pos);
                }
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                return Token::new(kind, ch0.to_string(), pos);
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}
                let end = self.cursor();
                return Token::new(TokenKind::Number, &self.code[idx..end], pos);
            }

            // 4. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                while self
                    .iter
                    .next_if(|(_, ch)| matches!(ch, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z'))
                    .is_some()
                {}
                let end = self.cursor();
                let lexeme = &self.code[idx..end];
                let kind = keyword(lexeme).unwrap_or(TokenKind::Ident);
                return Token::new(kind, lexeme, pos);
            }

            // Error
            self.consume();
            return Token::new(TokenKind::Error, ch0.to_string(), pos);
        }
        Token::new(TokenKind::Eof, "", self.pos(self.code.len()))
    }
}

/// Yields every token up to and including a single `Eof`.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}
