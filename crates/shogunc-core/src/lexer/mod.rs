//! SQL lexer.
//!
//! A pull-based tokenizer shared by the schema grammar and the query grammar.
//! It never fails: unknown input becomes [`TokenKind::Illegal`] and the end of
//! input is reported as [`TokenKind::Eof`] forever.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
