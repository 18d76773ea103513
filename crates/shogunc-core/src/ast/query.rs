//! Query statements and their normalized SQL rendering.
//!
//! `Display` on every node produces normalized SQL: keywords upper-case,
//! identifiers lower-case, single spaces, bind placeholders as `$N`.
//! Parsing the rendered text yields an equal tree.

use std::fmt;

use serde::Serialize;

/// A literal value inside a condition or a `VALUES` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Integer(i64),
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// Where a bound value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindValue {
    /// A call-time parameter at a 1-based position.
    Param(usize),
    /// A value fixed in the query text.
    Literal(Literal),
}

/// A value bound to a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bind {
    pub column: String,
    pub value: BindValue,
}

impl Bind {
    #[must_use]
    pub fn param(column: impl Into<String>, position: usize) -> Self {
        Self {
            column: column.into(),
            value: BindValue::Param(position),
        }
    }

    #[must_use]
    pub fn literal(column: impl Into<String>, literal: Literal) -> Self {
        Self {
            column: column.into(),
            value: BindValue::Literal(literal),
        }
    }

    /// The parameter position, or `0` for a literal.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self.value {
            BindValue::Param(position) => position,
            BindValue::Literal(_) => 0,
        }
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(position) => write!(f, "${position}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// Comparison operators allowed in `WHERE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl ComparisonOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
        }
    }
}

/// Logical operator chaining a condition to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// One `column op value` comparison in a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// The operator joining this condition to the previous one.
    pub chain: Option<LogicalOp>,
    pub column: String,
    pub op: ComparisonOp,
    pub bind: Bind,
}

/// A `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub distinct: bool,
    /// Selected columns, `*` included as written.
    pub columns: Vec<String>,
    /// Lower-cased table name.
    pub table: String,
    pub conditions: Vec<Condition>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectStatement {
    /// Returns true if the statement selects every column with `*`.
    #[must_use]
    pub fn selects_all(&self) -> bool {
        self.columns.is_empty() || self.columns.iter().any(|c| c == "*")
    }

    /// Binds from the `WHERE` clause, in source order.
    pub fn binds(&self) -> impl Iterator<Item = &Bind> {
        self.conditions.iter().map(|condition| &condition.bind)
    }
}

/// The `OR <action>` conflict clause of `INSERT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictAction {
    Replace,
    Ignore,
    Abort,
    Fail,
    Rollback,
}

impl ConflictAction {
    #[must_use]
    pub fn from_upper(word: &str) -> Option<Self> {
        match word {
            "REPLACE" => Some(Self::Replace),
            "IGNORE" => Some(Self::Ignore),
            "ABORT" => Some(Self::Abort),
            "FAIL" => Some(Self::Fail),
            "ROLLBACK" => Some(Self::Rollback),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "REPLACE",
            Self::Ignore => "IGNORE",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Rollback => "ROLLBACK",
        }
    }
}

/// An `INSERT` statement.
///
/// `values` holds every tuple flattened. Value `i` of each tuple is bound to
/// `columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertStatement {
    pub conflict: Option<ConflictAction>,
    /// Lower-cased table name.
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Bind>,
    /// `RETURNING` columns, `*` included as written.
    pub returning: Vec<String>,
}

impl InsertStatement {
    /// Returns true if the statement has a `RETURNING` clause.
    #[must_use]
    pub fn has_returning(&self) -> bool {
        !self.returning.is_empty()
    }

    /// Returns true if `RETURNING *` was written.
    #[must_use]
    pub fn returns_all(&self) -> bool {
        self.returning.iter().any(|c| c == "*")
    }
}

/// A parsed query statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
}

impl Statement {
    /// The lower-cased table the statement reads or writes.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Select(select) => &select.table,
            Self::Insert(insert) => &insert.table,
        }
    }

    /// All binds in source order.
    #[must_use]
    pub fn binds(&self) -> Vec<&Bind> {
        match self {
            Self::Select(select) => select.binds().collect(),
            Self::Insert(insert) => insert.values.iter().collect(),
        }
    }

    fn binds_mut(&mut self) -> Vec<&mut Bind> {
        match self {
            Self::Select(select) => select
                .conditions
                .iter_mut()
                .map(|condition| &mut condition.bind)
                .collect(),
            Self::Insert(insert) => insert.values.iter_mut().collect(),
        }
    }

    /// Renumbers parameter positions to `1..=N`, keeping their order.
    ///
    /// `$1, $3` becomes `$1, $2` and `$2, $2` becomes `$1, $1`.
    #[must_use]
    pub fn with_dense_positions(&self) -> Self {
        let mut written: Vec<usize> = self
            .binds()
            .iter()
            .map(|bind| bind.position())
            .filter(|&position| position > 0)
            .collect();
        written.sort_unstable();
        written.dedup();

        let mut dense = self.clone();
        for bind in dense.binds_mut() {
            if let BindValue::Param(position) = &mut bind.value {
                if let Ok(index) = written.binary_search(&*position) {
                    *position = index + 1;
                }
            }
        }
        dense
    }
}

// ================================================================
// Normalized SQL rendering
// ================================================================

fn write_column_list(f: &mut fmt::Formatter<'_>, columns: &[String]) -> fmt::Result {
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&column.to_lowercase())?;
    }
    Ok(())
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column.to_lowercase(),
            self.op.as_str(),
            self.bind.value
        )
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if self.columns.is_empty() {
            f.write_str("*")?;
        } else {
            write_column_list(f, &self.columns)?;
        }
        write!(f, " FROM {}", self.table)?;

        for (i, condition) in self.conditions.iter().enumerate() {
            if i == 0 {
                f.write_str(" WHERE ")?;
            } else if let Some(chain) = condition.chain {
                write!(f, " {} ", chain.as_str())?;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{condition}")?;
        }

        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("INSERT ")?;
        if let Some(action) = self.conflict {
            write!(f, "OR {} ", action.as_str())?;
        }
        write!(f, "INTO {} (", self.table)?;
        write_column_list(f, &self.columns)?;
        f.write_str(") VALUES ")?;

        let width = self.columns.len().max(1);
        for (i, tuple) in self.values.chunks(width).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            for (j, bind) in tuple.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", bind.value)?;
            }
            f.write_str(")")?;
        }

        if self.has_returning() {
            f.write_str(" RETURNING ")?;
            write_column_list(f, &self.returning)?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Insert(insert) => write!(f, "{insert}"),
        }
    }
}
