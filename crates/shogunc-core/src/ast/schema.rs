//! Schema declarations: tables, their fields and enum types.

use std::fmt;

use serde::Serialize;

/// Column data types understood by the schema grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Uuid,
    Text,
    /// `VARCHAR` with an optional length.
    Varchar(Option<u32>),
    Int,
    Bigint,
    Smallint,
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Boolean,
    Timestamp,
    Date,
    /// A column typed by a declared enum, holding the enum's name.
    Enum(String),
}

impl DataType {
    /// Maps an upper-cased built-in type name to its data type.
    #[must_use]
    pub fn from_builtin(name: &str) -> Option<Self> {
        let data_type = match name {
            "UUID" => Self::Uuid,
            "TEXT" => Self::Text,
            "VARCHAR" => Self::Varchar(None),
            "INT" | "INTEGER" => Self::Int,
            "BIGINT" => Self::Bigint,
            "SMALLINT" => Self::Smallint,
            "DECIMAL" | "NUMERIC" => Self::Decimal {
                precision: None,
                scale: None,
            },
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TIMESTAMP" => Self::Timestamp,
            "DATE" => Self::Date,
            _ => return None,
        };
        Some(data_type)
    }

    /// Returns true if `DEFAULT now()` resolves to a date/time on this type.
    #[must_use]
    pub const fn accepts_now_default(&self) -> bool {
        matches!(self, Self::Timestamp | Self::Date)
    }

    /// The type's name as written in SQL, without length or precision.
    #[must_use]
    pub fn literal(&self) -> &str {
        match self {
            Self::Uuid => "UUID",
            Self::Text => "TEXT",
            Self::Varchar(_) => "VARCHAR",
            Self::Int => "INT",
            Self::Bigint => "BIGINT",
            Self::Smallint => "SMALLINT",
            Self::Decimal { .. } => "DECIMAL",
            Self::Boolean => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Enum(name) => name,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varchar(Some(len)) => write!(f, "VARCHAR({len})"),
            Self::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => write!(f, "DECIMAL({p}, {s})"),
            Self::Decimal {
                precision: Some(p),
                scale: None,
            } => write!(f, "DECIMAL({p})"),
            Self::Enum(name) => write!(f, "\"{name}\""),
            other => f.write_str(other.literal()),
        }
    }
}

/// A column definition inside `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub not_null: bool,
    /// The resolved `DEFAULT` literal, if any.
    pub default: Option<String>,
    pub primary_key: bool,
    pub unique: bool,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            not_null: false,
            default: None,
            primary_key: false,
            unique: false,
        }
    }

    /// A column may hold NULL unless it is `NOT NULL` or the primary key.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !(self.not_null || self.primary_key)
    }
}

/// A `CREATE TABLE` declaration. Fields keep their source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Table {
    /// Finds a field by name, ignoring ASCII case.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}

/// A `CREATE TYPE ... AS ENUM` declaration.
///
/// Values keep their source order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
}

/// A top-level schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaItem {
    Table(Table),
    Enum(Enum),
}

impl SchemaItem {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Table(table) => &table.name,
            Self::Enum(enumeration) => &enumeration.name,
        }
    }
}
