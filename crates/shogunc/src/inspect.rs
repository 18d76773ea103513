//! JSON views of parsed inputs.

use serde::Serialize;
use shogunc_core::{extract_query_blocks, parse_query_block, QueryBlock, Statement};

use crate::config::SqlConfig;
use crate::discover::query_files;
use crate::error::{Error, Result};

/// A query block with its parsed statement.
#[derive(Debug, Serialize)]
pub struct InspectedQuery {
    #[serde(flatten)]
    pub block: QueryBlock,
    pub statement: Statement,
}

/// The parsed schema items as pretty JSON.
///
/// # Errors
///
/// Returns `Error::Io` if the schema cannot be read and `Error::Core` if
/// it does not parse.
pub fn schema_json(sql: &SqlConfig) -> Result<String> {
    let text = std::fs::read_to_string(&sql.schema).map_err(|e| Error::io(&sql.schema, e))?;
    let items = shogunc_core::parse_schema(&text).map_err(shogunc_core::Error::from)?;
    Ok(serde_json::to_string_pretty(&items)?)
}

/// Every query block with its parsed statement as pretty JSON.
///
/// # Errors
///
/// Returns `Error::Io` for unreadable files and `Error::Core` for the
/// first block that does not parse, wrapped with its name and file.
pub fn queries_json(sql: &SqlConfig) -> Result<String> {
    let mut inspected = Vec::new();
    for file in query_files(&sql.queries)? {
        let text = std::fs::read_to_string(&file).map_err(|e| Error::io(&file, e))?;
        for block in extract_query_blocks(&text, &file.display().to_string()) {
            let statement = parse_query_block(&block.sql).map_err(|e| {
                shogunc_core::Error::from(e).in_query(&block.name, &block.file_name)
            })?;
            inspected.push(InspectedQuery { block, statement });
        }
    }
    Ok(serde_json::to_string_pretty(&inspected)?)
}
