//! # shogunc-core
//!
//! A compiler from SQL schemas and annotated query files to typed Go
//! data-access code.
//!
//! This crate provides:
//! - A lexer and recursive descent parsers for `CREATE TABLE`,
//!   `CREATE TYPE ... AS ENUM`, `SELECT` and `INSERT`
//! - A type registry mapping SQL column types to Go types
//! - A Go syntax tree and printer for row structs, enums, params structs
//!   and query methods
//!
//! ## Example
//!
//! ```rust
//! use shogunc_core::{Driver, Pipeline};
//!
//! let mut pipeline = Pipeline::new(
//!     r#"CREATE TABLE users (id UUID PRIMARY KEY, email TEXT NOT NULL);"#,
//! )
//! .unwrap();
//! pipeline
//!     .add_query_file(
//!         "users.sql",
//!         "-- name: GetUser :one\nSELECT * FROM users WHERE id = $1;\n",
//!     )
//!     .unwrap();
//!
//! let sources = pipeline.render("db", Driver::Postgres).unwrap();
//! assert!(sources
//!     .queries
//!     .contains("func (q *Queries) GetUser(ctx context.Context, params GetUserParams) (Users, error) {"));
//! ```

pub mod ast;
pub mod codegen;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod registry;

pub use ast::{SchemaItem, Statement};
pub use codegen::{generate, Driver, GeneratedQuery, ResultShape};
pub use error::{Error, Result};
pub use extract::{extract_query_blocks, QueryBlock, QueryKind};
pub use parser::{ParseError, QueryParser, SchemaParser};
pub use pipeline::{GeneratedSources, Pipeline};
pub use registry::TypeRegistry;

/// Parses a schema file into its tables and enums, in declaration order.
///
/// # Errors
///
/// Returns the first syntax error.
pub fn parse_schema(input: &str) -> std::result::Result<Vec<SchemaItem>, ParseError> {
    SchemaParser::new(input).parse()
}

/// Parses the SQL of one query block.
///
/// # Errors
///
/// Returns the first syntax error.
pub fn parse_query_block(input: &str) -> std::result::Result<Statement, ParseError> {
    QueryParser::new(input).parse()
}
