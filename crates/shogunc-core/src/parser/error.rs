//! Parser error types.

use std::fmt;

use crate::lexer::{Span, Token};

/// A syntax error with the offending token and its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Literal text of the token found, if any.
    pub found: Option<String>,
    /// 0-based index of the column definition being parsed, for schema errors.
    pub field_index: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            found: None,
            field_index: None,
        }
    }

    /// Creates an "expected X, found Y" error at `found`.
    #[must_use]
    pub fn unexpected(expected: &str, found: &Token) -> Self {
        Self {
            message: format!("expected {expected}, found {found}"),
            span: found.span,
            found: Some(found.literal.clone()),
            field_index: None,
        }
    }

    /// Attaches the index of the column definition being parsed.
    #[must_use]
    pub const fn in_field(mut self, index: usize) -> Self {
        self.field_index = Some(index);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(index) = self.field_index {
            write!(f, " in field {index}")?;
        }
        write!(f, " at position {}..{}", self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_unexpected_message() {
        let token = Token::new(TokenKind::Ident, "FORM", Span::new(9, 13));
        let err = ParseError::unexpected("FROM", &token);
        assert_eq!(err.found.as_deref(), Some("FORM"));
        assert_eq!(
            err.to_string(),
            "expected FROM, found identifier 'FORM' at position 9..13"
        );
    }

    #[test]
    fn test_field_index_in_message() {
        let err = ParseError::new("unknown data type 'JSONB'", Span::new(20, 25)).in_field(2);
        assert_eq!(
            err.to_string(),
            "unknown data type 'JSONB' in field 2 at position 20..25"
        );
    }
}
