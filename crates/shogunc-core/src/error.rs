//! Error types for schema loading and code generation.

use crate::parser::ParseError;

/// Errors produced while parsing, resolving or generating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The schema or a query failed to parse.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// A column's SQL type has no Go mapping.
    #[error("unknown SQL type '{0}'")]
    UnknownType(String),

    /// A query references a table or enum absent from the schema.
    #[error("table '{0}' is not declared in the schema")]
    UnknownTable(String),

    /// A query references a column its table does not declare.
    #[error("table '{table}' has no column '{column}'")]
    UnknownColumn {
        /// The table that was searched.
        table: String,
        /// The missing column.
        column: String,
    },

    /// A query block carries a kind tag other than `one`, `many` or `exec`.
    #[error("unsupported query kind '{0}', expected one, many or exec")]
    UnsupportedQueryKind(String),

    /// The database driver name is not `sqlite3` or `postgres`.
    #[error("unsupported driver '{0}', expected sqlite3 or postgres")]
    UnsupportedDriver(String),

    /// The statement and kind combination has no generated form.
    #[error("not implemented: {0}")]
    Unimplemented(String),

    /// A table or enum name is declared twice.
    #[error("'{0}' is declared more than once in the schema")]
    DuplicateDeclaration(String),

    /// Two query blocks share a name.
    #[error("query '{name}' is defined in both '{first_file}' and '{second_file}'")]
    DuplicateQuery {
        /// The block name.
        name: String,
        /// File of the first definition.
        first_file: String,
        /// File of the second definition.
        second_file: String,
    },

    /// A failure inside one query block.
    #[error("query '{name}' in '{file}': {source}")]
    Query {
        /// The block name.
        name: String,
        /// The file the block came from.
        file: String,
        /// The underlying error.
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` with the query block it occurred in.
    #[must_use]
    pub fn in_query(self, name: &str, file: &str) -> Self {
        Self::Query {
            name: name.to_string(),
            file: file.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping query context.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Query { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for shogunc operations.
pub type Result<T> = std::result::Result<T, Error>;
