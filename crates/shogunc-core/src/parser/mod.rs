//! Recursive descent parsers for the schema and query grammars.
//!
//! Both grammars share the lexer and a one-token-lookahead cursor. The
//! schema grammar accepts `CREATE TABLE` and `CREATE TYPE ... AS ENUM`;
//! the query grammar accepts one `SELECT` or `INSERT` per block.

mod cursor;
mod error;
mod query;
mod schema;

pub use error::ParseError;
pub use query::QueryParser;
pub use schema::SchemaParser;
