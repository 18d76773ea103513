//! Splits annotated `.sql` files into named query blocks.
//!
//! A block starts at a tag line of the form
//!
//! ```sql
//! -- name: GetUser :one
//! ```
//!
//! and runs until the next tag line or the end of the file.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Error;

/// `\s` and `\w` are spelled out so they stay ASCII-only.
const TAG_PATTERN: &str =
    r"^--[\t\n\f\r ]*name:[\t\n\f\r ]*([0-9A-Za-z_]+)[\t\n\f\r ]*:([0-9A-Za-z_]+)$";

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(TAG_PATTERN).expect("Invalid query tag regex"))
}

/// What a generated function returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// A single row.
    One,
    /// A list of rows.
    Many,
    /// No rows.
    Exec,
}

impl QueryKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Many => "many",
            Self::Exec => "exec",
        }
    }
}

impl FromStr for QueryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(Self::One),
            "many" => Ok(Self::Many),
            "exec" => Ok(Self::Exec),
            other => Err(Error::UnsupportedQueryKind(other.to_string())),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged statement from a query file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryBlock {
    /// Block name with its first character upper-cased.
    pub name: String,
    /// The kind tag exactly as written; checked by [`QueryBlock::kind`].
    pub kind: String,
    /// Raw SQL lines, each terminated by `\n`.
    pub sql: String,
    pub file_name: String,
}

impl QueryBlock {
    /// Parses the kind tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedQueryKind` for anything other than `one`,
    /// `many` or `exec`.
    pub fn kind(&self) -> Result<QueryKind, Error> {
        self.kind.parse()
    }
}

/// Extracts the tagged blocks of `text` in file order.
///
/// Lines before the first tag are ignored. A file without tags yields an
/// empty list.
#[must_use]
pub fn extract_query_blocks(text: &str, file_name: &str) -> Vec<QueryBlock> {
    let mut blocks: Vec<QueryBlock> = Vec::new();

    for line in text.lines() {
        if let Some(captures) = tag_regex().captures(line) {
            blocks.push(QueryBlock {
                name: capitalize(&captures[1]),
                kind: captures[2].to_string(),
                sql: String::new(),
                file_name: file_name.to_string(),
            });
            continue;
        }
        if let Some(block) = blocks.last_mut() {
            block.sql.push_str(line);
            block.sql.push('\n');
        }
    }

    blocks
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
