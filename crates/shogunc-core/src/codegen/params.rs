//! `{Name}Params` structs built from bind parameters.

use std::collections::{BTreeMap, HashSet};

use super::go::{GoType, StructDecl, StructField};
use super::naming::{exported_name, snake_case};
use crate::ast::{Bind, BindValue, Table};
use crate::error::{Error, Result};
use crate::registry::{ColumnTypes, TypeRegistry};

/// Builds the params struct for `binds`, or `None` if no bind is positional.
///
/// Every bind's column is checked against the table, literal ones
/// included. Fields follow ascending position; a position used twice
/// yields one field.
pub(super) fn param_record(
    query_name: &str,
    binds: &[&Bind],
    table: &Table,
    columns: &ColumnTypes,
    registry: &TypeRegistry,
    nullable_params: bool,
) -> Result<Option<StructDecl>> {
    let mut by_position: BTreeMap<usize, (&Bind, GoType)> = BTreeMap::new();
    for &bind in binds {
        let go_type = bind_type(&bind.column, table, columns, registry, nullable_params)?;
        if let BindValue::Param(position) = bind.value {
            by_position.entry(position).or_insert((bind, go_type));
        }
    }
    if by_position.is_empty() {
        return Ok(None);
    }

    let mut taken = HashSet::new();
    let fields = by_position
        .into_iter()
        .map(|(position, (bind, ty))| {
            let mut name = exported_name(&bind.column);
            let mut tag = snake_case(&bind.column);
            if !taken.insert(name.clone()) {
                name = format!("{name}{position}");
                tag = format!("{tag}_{position}");
                taken.insert(name.clone());
            }
            StructField {
                name,
                ty,
                tag: Some(format!("json:\"{tag}\"")),
            }
        })
        .collect();

    Ok(Some(StructDecl {
        name: format!("{query_name}Params"),
        fields,
    }))
}

/// The Go type of a value bound to `column`.
///
/// Columns of the table come first. A column named after an enum falls
/// back to the enum's synthetic string entry.
fn bind_type(
    column: &str,
    table: &Table,
    columns: &ColumnTypes,
    registry: &TypeRegistry,
    nullable_params: bool,
) -> Result<GoType> {
    if let Some(resolved) = columns.get(column) {
        let ty = resolved.go_type.clone();
        return Ok(if nullable_params && resolved.nullable {
            ty.pointer()
        } else {
            ty
        });
    }
    if registry.enumeration(column).is_some() {
        if let Some(entry) = registry.resolve(column)?.get(column) {
            return Ok(entry.go_type.clone());
        }
    }
    Err(Error::UnknownColumn {
        table: table.name.clone(),
        column: column.to_lowercase(),
    })
}
