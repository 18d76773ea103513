//! Go declarations for schema tables and enums.

use super::go::{Decl, EnumDecl, EnumMember, StructDecl, StructField};
use super::naming::{enum_member_name, exported_name};
use crate::ast::{Enum, SchemaItem, Table};
use crate::error::Result;
use crate::registry::TypeRegistry;

/// `type Name string` with one constant per declared value, in order.
#[must_use]
pub fn enum_decl(enumeration: &Enum) -> EnumDecl {
    let name = exported_name(&enumeration.name);
    let members = enumeration
        .values
        .iter()
        .map(|value| EnumMember {
            name: enum_member_name(&name, value),
            value: value.clone(),
        })
        .collect();
    EnumDecl { name, members }
}

/// The row struct of a table. Nullable columns become pointers.
///
/// # Errors
///
/// Returns `Error::UnknownType` if a column uses an undeclared enum.
pub fn row_struct(table: &Table, registry: &TypeRegistry) -> Result<StructDecl> {
    let columns = registry.resolve_table(table)?;
    let fields = columns
        .iter()
        .map(|column| StructField {
            name: exported_name(&column.name),
            ty: if column.nullable {
                column.go_type.clone().pointer()
            } else {
                column.go_type.clone()
            },
            tag: Some(format!("json:\"{0}\" db:\"{0}\"", column.name)),
        })
        .collect();
    Ok(StructDecl {
        name: exported_name(&table.name),
        fields,
    })
}

/// Declarations for every schema item, in declaration order.
///
/// # Errors
///
/// Returns `Error::UnknownType` if a column uses an undeclared enum.
pub fn schema_decls(registry: &TypeRegistry) -> Result<Vec<Decl>> {
    registry
        .items()
        .iter()
        .map(|item| match item {
            SchemaItem::Table(table) => row_struct(table, registry).map(Decl::Struct),
            SchemaItem::Enum(enumeration) => Ok(Decl::Enum(enum_decl(enumeration))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataType, Field};
    use crate::codegen::GoType;

    #[test]
    fn test_enum_decl() {
        let decl = enum_decl(&Enum {
            name: "role".into(),
            values: vec!["admin".into(), "user".into()],
        });
        assert_eq!(
            decl.to_string(),
            "type Role string\n\
             \n\
             const (\n\
             \tRole_Admin Role = \"admin\"\n\
             \tRole_User  Role = \"user\"\n\
             )"
        );
    }

    #[test]
    fn test_row_struct_nullable_pointer() {
        let mut id = Field::new("id", DataType::Int);
        id.primary_key = true;
        let mut name = Field::new("name", DataType::Text);
        name.not_null = true;
        let table = Table {
            name: "users".into(),
            fields: vec![id, name, Field::new("seen_at", DataType::Timestamp)],
        };
        let decl = row_struct(&table, &TypeRegistry::new()).unwrap();
        assert_eq!(decl.name, "Users");
        let types: Vec<_> = decl.fields.iter().map(|f| f.ty.clone()).collect();
        assert_eq!(
            types,
            vec![GoType::Int, GoType::String, GoType::Time.pointer()]
        );
        assert_eq!(
            decl.fields[2].tag.as_deref(),
            Some("json:\"seen_at\" db:\"seen_at\"")
        );
        assert!(decl.uses_time());
    }
}
