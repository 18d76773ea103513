//! Token cursor with one token of lookahead.

use super::error::ParseError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

pub(super) struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
        }
    }

    pub(super) const fn current(&self) -> &Token {
        &self.current
    }

    pub(super) const fn peek(&self) -> &Token {
        &self.peek
    }

    /// Moves to the next token and returns the one just left.
    pub(super) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let peek = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.current, peek)
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.is_keyword(keyword)
    }

    /// Consumes the current token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    /// Consumes a token of the given kind or fails naming `expected`.
    pub(super) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Builds an "expected X, found <current>" error.
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, &self.current)
    }

    /// Parses the current token as an unsigned integer.
    pub(super) fn expect_unsigned(&mut self, expected: &str) -> Result<u64, ParseError> {
        let token = self.expect(TokenKind::Integer, expected)?;
        token.literal.parse().map_err(|_| {
            ParseError::new(
                format!("integer '{}' is out of range", token.literal),
                token.span,
            )
        })
    }
}
