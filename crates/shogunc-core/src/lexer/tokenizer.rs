//! SQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input on demand.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace, `--` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn make_token(&self, kind: TokenKind, literal: impl Into<String>) -> Token {
        Token::new(kind, literal, Span::new(self.start, self.pos))
    }

    /// Makes a token whose literal is the raw text it spans.
    fn make_raw(&self, kind: TokenKind) -> Token {
        self.make_token(kind, &self.input[self.start..self.pos])
    }

    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let word = self.input[self.start..self.pos].to_uppercase();
        match Keyword::from_upper(&word) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword), word),
            None => self.make_token(TokenKind::Ident, word),
        }
    }

    fn scan_integer(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.make_raw(TokenKind::Integer)
    }

    /// Scans a quoted span. The opening quote is already consumed.
    ///
    /// Inside single quotes `''` stands for one `'`. Nothing else is an
    /// escape.
    fn scan_quoted(&mut self, quote: char) -> Token {
        let mut content = String::new();
        loop {
            match self.advance() {
                Some('\'') if quote == '\'' && self.peek() == Some('\'') => {
                    self.advance();
                    content.push('\'');
                }
                Some(c) if c == quote => return self.make_token(TokenKind::String, content),
                Some(c) => content.push(c),
                None => return self.make_raw(TokenKind::Illegal),
            }
        }
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted every call returns an `Eof` token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof, "");
        };

        match c {
            '=' => self.make_raw(TokenKind::Eq),
            ',' => self.make_raw(TokenKind::Comma),
            ';' => self.make_raw(TokenKind::Semicolon),
            '(' => self.make_raw(TokenKind::LeftParen),
            ')' => self.make_raw(TokenKind::RightParen),
            '*' => self.make_raw(TokenKind::Star),
            '$' => self.make_raw(TokenKind::Dollar),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_raw(TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_raw(TokenKind::NotEq)
                }
                _ => self.make_raw(TokenKind::Lt),
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_raw(TokenKind::GtEq)
                } else {
                    self.make_raw(TokenKind::Gt)
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.make_raw(TokenKind::NotEq)
            }
            '\'' | '"' => self.scan_quoted(c),
            c if c.is_ascii_digit() => self.scan_integer(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(),
            _ => self.make_raw(TokenKind::Illegal),
        }
    }

    /// Tokenizes the entire input. The final token is always `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
