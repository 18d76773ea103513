//! Abstract syntax tree for schema declarations and query statements.

mod query;
mod schema;

pub use query::{
    Bind, BindValue, ComparisonOp, Condition, ConflictAction, InsertStatement, Literal,
    LogicalOp, SelectStatement, Statement,
};
pub use schema::{DataType, Enum, Field, SchemaItem, Table};
