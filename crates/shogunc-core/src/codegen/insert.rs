//! Lowering of `INSERT` statements.

use super::{all_fields, row_type, scan_field, Lowering, ResultShape};
use crate::ast::{InsertStatement, Table};
use crate::error::Result;
use crate::extract::QueryKind;

/// Without `RETURNING` the function only reports an error. With it,
/// `many` yields a slice and `one` or `exec` a single row.
pub(super) fn lower(insert: &InsertStatement, kind: QueryKind, table: &Table) -> Result<Lowering> {
    for column in &insert.columns {
        scan_field(table, column)?;
    }

    if !insert.has_returning() {
        return Ok(Lowering {
            shape: ResultShape::None,
            scan: Vec::new(),
            nullable_params: true,
        });
    }

    let shape = match kind {
        QueryKind::One | QueryKind::Exec => ResultShape::Single(row_type(table)),
        QueryKind::Many => ResultShape::List(row_type(table)),
    };
    let scan = if insert.returns_all() {
        all_fields(table)
    } else {
        insert
            .returning
            .iter()
            .map(|column| scan_field(table, column))
            .collect::<Result<_>>()?
    };

    Ok(Lowering {
        shape,
        scan,
        nullable_params: true,
    })
}
