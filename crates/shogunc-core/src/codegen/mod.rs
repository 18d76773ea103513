//! Go code generation.
//!
//! A parsed statement is lowered against the [`TypeRegistry`] into a Go
//! method on `*Queries`, an optional `{Name}Params` struct and a
//! [`ResultShape`]. Schema declarations become Go types, and whole files
//! are assembled by [`render_queries_file`] and [`render_db_file`].

mod body;
mod driver;
mod file;
pub mod go;
mod insert;
pub mod naming;
mod params;
mod select;
mod types;

pub use driver::Driver;
pub use file::{render_db_file, render_queries_file, GENERATED_HEADER};
pub use go::{Decl, EnumDecl, FuncDecl, GoFile, GoType, StructDecl};
pub use types::{enum_decl, row_struct, schema_decls};

use crate::ast::{Statement, Table};
use crate::error::{Error, Result};
use crate::extract::QueryKind;
use crate::registry::TypeRegistry;
use naming::exported_name;

/// What a generated function returns besides `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// One record of the given row type.
    Single(GoType),
    /// A slice of the given row type.
    List(GoType),
    /// Only an error.
    None,
}

impl ResultShape {
    /// The function's result list.
    #[must_use]
    pub fn result_types(&self) -> Vec<GoType> {
        match self {
            Self::Single(row) => vec![row.clone(), GoType::Error],
            Self::List(row) => vec![row.clone().slice(), GoType::Error],
            Self::None => vec![GoType::Error],
        }
    }
}

/// The generated pieces for one query block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuery {
    pub name: String,
    pub shape: ResultShape,
    /// The `{Name}Params` struct, present when the query has bind parameters.
    pub params: Option<StructDecl>,
    pub function: FuncDecl,
}

impl GeneratedQuery {
    #[must_use]
    pub fn function_source(&self) -> String {
        self.function.to_string()
    }

    #[must_use]
    pub fn params_source(&self) -> Option<String> {
        self.params.as_ref().map(ToString::to_string)
    }

    /// The params struct (if any) followed by the function.
    #[must_use]
    pub fn decls(&self) -> Vec<Decl> {
        let mut decls = Vec::with_capacity(2);
        if let Some(params) = &self.params {
            decls.push(Decl::Struct(params.clone()));
        }
        decls.push(Decl::Func(self.function.clone()));
        decls
    }
}

/// A statement lowered to its result shape and decode targets.
pub(crate) struct Lowering {
    pub(crate) shape: ResultShape,
    /// Row struct fields to scan into, in column order.
    pub(crate) scan: Vec<String>,
    /// Nullable columns take pointer-typed parameters.
    pub(crate) nullable_params: bool,
}

/// Generates the Go function for one statement.
///
/// # Errors
///
/// Returns `Error::UnknownTable`, `Error::UnknownColumn` or
/// `Error::UnknownType` when the statement does not match the schema, and
/// `Error::Unimplemented` for an `exec` SELECT.
pub fn generate(
    name: &str,
    statement: &Statement,
    kind: QueryKind,
    registry: &TypeRegistry,
) -> Result<GeneratedQuery> {
    let table = registry.table(statement.table())?;
    let columns = registry.resolve_table(table)?;

    let statement = statement.with_dense_positions();
    let lowering = match &statement {
        Statement::Select(select) => select::lower(select, kind, table)?,
        Statement::Insert(insert) => insert::lower(insert, kind, table)?,
    };
    let params = params::param_record(
        name,
        &statement.binds(),
        table,
        &columns,
        registry,
        lowering.nullable_params,
    )?;
    let function = body::query_function(name, &statement.to_string(), &lowering, params.as_ref());

    Ok(GeneratedQuery {
        name: name.to_string(),
        shape: lowering.shape,
        params,
        function,
    })
}

/// The Go type name of a table's row struct.
pub(crate) fn row_type(table: &Table) -> GoType {
    GoType::named(exported_name(&table.name))
}

/// Row struct field names for every column, in declaration order.
pub(crate) fn all_fields(table: &Table) -> Vec<String> {
    table
        .fields
        .iter()
        .map(|field| exported_name(&field.name))
        .collect()
}

/// Row struct field name for one column.
pub(crate) fn scan_field(table: &Table, column: &str) -> Result<String> {
    table
        .field(column)
        .map(|field| exported_name(&field.name))
        .ok_or_else(|| Error::UnknownColumn {
            table: table.name.clone(),
            column: column.to_lowercase(),
        })
}
