//! Whole generated Go files.

use std::fmt::Write as _;

use super::driver::COMMON_PREAMBLE;
use super::go::{Decl, GoFile};
use super::types::schema_decls;
use super::{Driver, GeneratedQuery};
use crate::error::Result;
use crate::registry::TypeRegistry;

/// First line of every generated file, without the comment marker.
pub const GENERATED_HEADER: &str = "Code generated by shogunc. DO NOT EDIT.";

/// Renders the queries file: schema types, then each query's params
/// struct and method, in the order given.
///
/// # Errors
///
/// Returns `Error::UnknownType` if a table column uses an undeclared enum.
pub fn render_queries_file(
    package: &str,
    registry: &TypeRegistry,
    queries: &[GeneratedQuery],
) -> Result<String> {
    let mut decls = schema_decls(registry)?;
    decls.extend(queries.iter().flat_map(GeneratedQuery::decls));

    let mut imports = Vec::new();
    if !queries.is_empty() {
        imports.push("context".to_string());
    }
    if decls.iter().any(Decl::uses_time) {
        imports.push("time".to_string());
    }

    let file = GoFile {
        header: Some(GENERATED_HEADER.to_string()),
        package: package.to_string(),
        imports,
        decls,
    };
    Ok(file.to_string())
}

/// Renders `db.go`: the `DBX` seam, `Queries` and the driver adapter.
#[must_use]
pub fn render_db_file(package: &str, driver: Driver) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {GENERATED_HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "package {package}");
    let _ = writeln!(out);
    out.push_str("import (\n");
    for import in driver.imports() {
        if import.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "\t{import}");
        }
    }
    out.push_str(")\n\n");
    out.push_str(COMMON_PREAMBLE);
    out.push('\n');
    out.push_str(driver.adapter());
    out
}
