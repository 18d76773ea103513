//! Lowering of `SELECT` statements.

use super::{all_fields, row_type, scan_field, Lowering, ResultShape};
use crate::ast::{SelectStatement, Table};
use crate::error::{Error, Result};
use crate::extract::QueryKind;

/// `one` returns a single row, `many` a slice. Rows decode in table order
/// for `*`, otherwise in select-list order.
pub(super) fn lower(select: &SelectStatement, kind: QueryKind, table: &Table) -> Result<Lowering> {
    let shape = match kind {
        QueryKind::One => ResultShape::Single(row_type(table)),
        QueryKind::Many => ResultShape::List(row_type(table)),
        QueryKind::Exec => {
            return Err(Error::Unimplemented(format!(
                "exec query selecting from '{}'; use one or many",
                table.name
            )))
        }
    };

    let scan = if select.selects_all() {
        all_fields(table)
    } else {
        select
            .columns
            .iter()
            .map(|column| scan_field(table, column))
            .collect::<Result<_>>()?
    };

    Ok(Lowering {
        shape,
        scan,
        nullable_params: false,
    })
}
