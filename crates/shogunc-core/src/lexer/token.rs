//! Token types for the SQL lexer.

use std::fmt;

use super::Span;

/// SQL keywords recognized by the schema and query grammars.
///
/// Words outside this table lex as identifiers, so type names such as
/// `VARCHAR` or function names such as `NOW` reach the parser as
/// [`TokenKind::Ident`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    Distinct,
    From,
    Where,
    Limit,
    Offset,
    Insert,
    Into,
    Values,
    Returning,

    // Conditions and literals
    And,
    Or,
    Not,
    Null,
    True,
    False,

    // Schema
    Create,
    Table,
    Type,
    Enum,
    As,
    If,
    Exists,
    Primary,
    Key,
    Unique,
    Default,
}

impl Keyword {
    /// Looks up an upper-cased word in the keyword table.
    #[must_use]
    pub fn from_upper(word: &str) -> Option<Self> {
        let keyword = match word {
            "SELECT" => Self::Select,
            "DISTINCT" => Self::Distinct,
            "FROM" => Self::From,
            "WHERE" => Self::Where,
            "LIMIT" => Self::Limit,
            "OFFSET" => Self::Offset,
            "INSERT" => Self::Insert,
            "INTO" => Self::Into,
            "VALUES" => Self::Values,
            "RETURNING" => Self::Returning,
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "CREATE" => Self::Create,
            "TABLE" => Self::Table,
            "TYPE" => Self::Type,
            "ENUM" => Self::Enum,
            "AS" => Self::As,
            "IF" => Self::If,
            "EXISTS" => Self::Exists,
            "PRIMARY" => Self::Primary,
            "KEY" => Self::Key,
            "UNIQUE" => Self::Unique,
            "DEFAULT" => Self::Default,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the keyword as it is written in SQL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Distinct => "DISTINCT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Returning => "RETURNING",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Type => "TYPE",
            Self::Enum => "ENUM",
            Self::As => "AS",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Unique => "UNIQUE",
            Self::Default => "DEFAULT",
        }
    }

    /// Returns true if the keyword has a role in the query grammar.
    ///
    /// The remaining keywords are schema-only and may be used as column
    /// names inside queries.
    #[must_use]
    pub const fn is_query_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::Distinct
                | Self::From
                | Self::Where
                | Self::Limit
                | Self::Offset
                | Self::Insert
                | Self::Into
                | Self::Values
                | Self::Returning
                | Self::And
                | Self::Or
                | Self::Not
                | Self::Null
                | Self::True
                | Self::False
        )
    }
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A character (or unterminated quote) the lexer does not understand.
    Illegal,
    Eof,

    Ident,
    Integer,
    /// Quoted text, either `'...'` or `"..."`.
    String,
    Keyword(Keyword),

    // Operators
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Punctuation
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    Star,
    Dollar,
}

impl TokenKind {
    /// Short human-readable name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Illegal => "illegal character",
            Self::Eof => "end of input",
            Self::Ident => "identifier",
            Self::Integer => "integer",
            Self::String => "quoted string",
            Self::Keyword(kw) => kw.as_str(),
            Self::Eq => "'='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::LtEq => "'<='",
            Self::GtEq => "'>='",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Star => "'*'",
            Self::Dollar => "'$'",
        }
    }
}

/// A token with its literal text and location.
///
/// Identifiers and keywords carry their upper-cased text, strings carry
/// their unquoted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Ident | TokenKind::Integer | TokenKind::Illegal => {
                write!(f, "{} '{}'", self.kind.name(), self.literal)
            }
            TokenKind::String => write!(f, "quoted string '{}'", self.literal),
            _ => f.write_str(self.kind.name()),
        }
    }
}
