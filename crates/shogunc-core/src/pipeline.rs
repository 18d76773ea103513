//! Schema loading and query compilation, end to end.

use std::collections::HashMap;

use tracing::debug;

use crate::ast::SchemaItem;
use crate::codegen::{self, render_db_file, render_queries_file, Driver, GeneratedQuery};
use crate::error::{Error, Result};
use crate::extract::{extract_query_blocks, QueryBlock};
use crate::registry::TypeRegistry;

/// The two generated Go files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    /// Schema types, params structs and query methods.
    pub queries: String,
    /// The driver preamble (`db.go`).
    pub db: String,
}

/// Compiles query files against one schema.
///
/// Queries keep the order they were added in, which is the order their
/// declarations appear in the rendered file.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    registry: TypeRegistry,
    queries: Vec<GeneratedQuery>,
    origins: HashMap<String, String>,
}

impl Pipeline {
    /// Parses `schema` and registers its declarations.
    ///
    /// # Errors
    ///
    /// Returns `Error::Syntax` for a malformed schema,
    /// `Error::DuplicateDeclaration` for a name declared twice and
    /// `Error::UnknownType` for a column typed by an undeclared enum.
    pub fn new(schema: &str) -> Result<Self> {
        let items = crate::parse_schema(schema)?;
        for item in &items {
            match item {
                SchemaItem::Table(table) => {
                    debug!(table = %table.name, fields = table.fields.len(), "Declared table");
                }
                SchemaItem::Enum(enumeration) => {
                    debug!(enumeration = %enumeration.name, values = enumeration.values.len(), "Declared enum");
                }
            }
        }
        let registry = TypeRegistry::from_items(items)?;
        for table in registry.tables() {
            registry.resolve_table(table)?;
        }
        Ok(Self::with_registry(registry))
    }

    /// Starts from an already built registry.
    #[must_use]
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry,
            queries: Vec::new(),
            origins: HashMap::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Compiles every block of one query file and returns how many it held.
    ///
    /// Stops at the first failing block; blocks compiled before it are kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateQuery` for a name already compiled, and any
    /// other failure wrapped in `Error::Query`.
    pub fn add_query_file(&mut self, file_name: &str, text: &str) -> Result<usize> {
        let blocks = extract_query_blocks(text, file_name);
        debug!(file = file_name, blocks = blocks.len(), "Extracted query blocks");
        for block in &blocks {
            self.add_block(block)?;
        }
        Ok(blocks.len())
    }

    /// Compiles one block.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::add_query_file`].
    pub fn add_block(&mut self, block: &QueryBlock) -> Result<()> {
        if let Some(first_file) = self.origins.get(&block.name) {
            return Err(Error::DuplicateQuery {
                name: block.name.clone(),
                first_file: first_file.clone(),
                second_file: block.file_name.clone(),
            });
        }
        let query = compile_block(block, &self.registry)
            .map_err(|err| err.in_query(&block.name, &block.file_name))?;
        debug!(
            query = %query.name,
            kind = %block.kind,
            params = query.params.as_ref().map_or(0, |p| p.fields.len()),
            "Generated query"
        );
        self.origins
            .insert(block.name.clone(), block.file_name.clone());
        self.queries.push(query);
        Ok(())
    }

    #[must_use]
    pub fn queries(&self) -> &[GeneratedQuery] {
        &self.queries
    }

    /// Renders both output files.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownType` if a table column uses an undeclared enum.
    pub fn render(&self, package: &str, driver: Driver) -> Result<GeneratedSources> {
        Ok(GeneratedSources {
            queries: render_queries_file(package, &self.registry, &self.queries)?,
            db: render_db_file(package, driver),
        })
    }
}

/// Parses and generates a single block.
///
/// # Errors
///
/// Returns the block's kind, syntax or resolution error, unwrapped.
pub fn compile_block(block: &QueryBlock, registry: &TypeRegistry) -> Result<GeneratedQuery> {
    let kind = block.kind()?;
    let statement = crate::parse_query_block(&block.sql)?;
    codegen::generate(&block.name, &statement, kind, registry)
}
