//! Schema declarations keyed by name, with SQL to Go type resolution.

use std::collections::HashMap;

use crate::ast::{DataType, Enum, SchemaItem, Table};
use crate::codegen::naming::exported_name;
use crate::codegen::GoType;
use crate::error::{Error, Result};

/// A column with its resolved Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub name: String,
    pub go_type: GoType,
    pub nullable: bool,
}

/// Resolved column types of one registry entry, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTypes {
    columns: Vec<ResolvedColumn>,
}

impl ColumnTypes {
    /// Looks up a column, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedColumn> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// All tables and enums of a schema.
///
/// Names form one case-insensitive namespace. Entries are never replaced
/// or removed once inserted.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    items: Vec<SchemaItem>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from parsed schema items.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateDeclaration` if two items share a name.
    pub fn from_items(items: impl IntoIterator<Item = SchemaItem>) -> Result<Self> {
        let mut registry = Self::new();
        for item in items {
            registry.insert(item)?;
        }
        Ok(registry)
    }

    /// Registers a table or enum.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateDeclaration` if the name is already taken.
    pub fn insert(&mut self, item: SchemaItem) -> Result<()> {
        let key = item.name().to_lowercase();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateDeclaration(item.name().to_string()));
        }
        self.index.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaItem> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.items[i])
    }

    /// Looks up a table.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownTable` if no table has this name.
    pub fn table(&self, name: &str) -> Result<&Table> {
        match self.get(name) {
            Some(SchemaItem::Table(table)) => Ok(table),
            _ => Err(Error::UnknownTable(name.to_string())),
        }
    }

    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        match self.get(name) {
            Some(SchemaItem::Enum(enumeration)) => Some(enumeration),
            _ => None,
        }
    }

    /// Items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[SchemaItem] {
        &self.items
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.items.iter().filter_map(|item| match item {
            SchemaItem::Table(table) => Some(table),
            SchemaItem::Enum(_) => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves the column types of a table, or the synthetic
    /// `{EnumName: string}` entry of an enum.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownTable` for an absent name and
    /// `Error::UnknownType` for a column typed by an undeclared enum.
    pub fn resolve(&self, name: &str) -> Result<ColumnTypes> {
        match self.get(name) {
            Some(SchemaItem::Table(table)) => self.resolve_table(table),
            Some(SchemaItem::Enum(enumeration)) => Ok(ColumnTypes {
                columns: vec![ResolvedColumn {
                    name: enumeration.name.clone(),
                    go_type: GoType::String,
                    nullable: false,
                }],
            }),
            None => Err(Error::UnknownTable(name.to_string())),
        }
    }

    /// Resolves every field of `table` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownType` for a column typed by an undeclared enum.
    pub fn resolve_table(&self, table: &Table) -> Result<ColumnTypes> {
        let columns = table
            .fields
            .iter()
            .map(|field| {
                Ok(ResolvedColumn {
                    name: field.name.clone(),
                    go_type: self.go_type(&field.data_type)?,
                    nullable: field.is_nullable(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ColumnTypes { columns })
    }

    /// Maps a SQL data type to its Go type.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownType` naming the enum if it is not declared.
    pub fn go_type(&self, data_type: &DataType) -> Result<GoType> {
        let go_type = match data_type {
            DataType::Uuid | DataType::Text | DataType::Varchar(_) => GoType::String,
            DataType::Int | DataType::Bigint | DataType::Smallint => GoType::Int,
            DataType::Decimal { .. } => GoType::Float64,
            DataType::Boolean => GoType::Bool,
            DataType::Timestamp | DataType::Date => GoType::Time,
            DataType::Enum(name) => {
                let enumeration = self
                    .enumeration(name)
                    .ok_or_else(|| Error::UnknownType(name.clone()))?;
                GoType::named(exported_name(&enumeration.name))
            }
        };
        Ok(go_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Field;

    fn users() -> SchemaItem {
        let mut id = Field::new("id", DataType::Uuid);
        id.primary_key = true;
        SchemaItem::Table(Table {
            name: "users".into(),
            fields: vec![
                id,
                Field::new("email", DataType::Varchar(None)),
                Field::new("role", DataType::Enum("user_role".into())),
                Field::new("created_at", DataType::Timestamp),
            ],
        })
    }

    fn role() -> SchemaItem {
        SchemaItem::Enum(Enum {
            name: "user_role".into(),
            values: vec!["admin".into(), "user".into()],
        })
    }

    #[test]
    fn test_resolve_table_in_field_order() {
        let registry = TypeRegistry::from_items([role(), users()]).unwrap();
        let columns = registry.resolve("users").unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email", "role", "created_at"]);
        assert_eq!(columns.get("ID").unwrap().go_type, GoType::String);
        assert!(!columns.get("id").unwrap().nullable);
        assert!(columns.get("email").unwrap().nullable);
        assert_eq!(
            columns.get("role").unwrap().go_type,
            GoType::named("UserRole")
        );
        assert_eq!(columns.get("created_at").unwrap().go_type, GoType::Time);
    }

    #[test]
    fn test_resolve_enum_synthetic_entry() {
        let registry = TypeRegistry::from_items([role()]).unwrap();
        let columns = registry.resolve("user_role").unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.get("user_role").unwrap().go_type, GoType::String);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = TypeRegistry::from_items([users(), role()]).unwrap();
        assert!(registry.table("USERS").is_ok());
        assert!(registry.enumeration("User_Role").is_some());
    }

    #[test]
    fn test_unknown_name() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.resolve("ghosts").unwrap_err(),
            Error::UnknownTable("ghosts".into())
        );
    }

    #[test]
    fn test_enum_is_not_a_table() {
        let registry = TypeRegistry::from_items([role()]).unwrap();
        assert!(matches!(
            registry.table("user_role"),
            Err(Error::UnknownTable(_))
        ));
    }

    #[test]
    fn test_undeclared_enum_type() {
        let registry = TypeRegistry::from_items([users()]).unwrap();
        assert_eq!(
            registry.resolve("users").unwrap_err(),
            Error::UnknownType("user_role".into())
        );
    }

    #[test]
    fn test_duplicate_declaration() {
        let err = TypeRegistry::from_items([users(), users()]).unwrap_err();
        assert_eq!(err, Error::DuplicateDeclaration("users".into()));
    }
}
