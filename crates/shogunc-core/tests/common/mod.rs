#![allow(dead_code)]

use shogunc_core::ast::{InsertStatement, SchemaItem, SelectStatement, Statement, Table};
use shogunc_core::{
    generate, parse_query_block, parse_schema, GeneratedQuery, ParseError, QueryKind,
    TypeRegistry,
};

pub const USERS_SCHEMA: &str = r#"CREATE TABLE "users" ("id" UUID, "email" VARCHAR);"#;

pub fn parse(sql: &str) -> Statement {
    parse_query_block(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_query_block(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_schema_ok(sql: &str) -> Vec<SchemaItem> {
    parse_schema(sql).unwrap_or_else(|e| panic!("Failed to parse schema: {sql}\nError: {e:?}"))
}

pub fn parse_table(sql: &str) -> Table {
    match parse_schema_ok(sql).remove(0) {
        SchemaItem::Table(t) => t,
        other => panic!("Expected table, got {other:?}"),
    }
}

/// Verifies that rendering a parsed statement and parsing it again
/// yields the same tree, and that the rendering is a fixed point.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    assert_eq!(ast1, ast2, "Round-trip changed the tree.\n  Input: {sql}\n  Rendered: {rendered1}");
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

pub fn registry(schema: &str) -> TypeRegistry {
    TypeRegistry::from_items(parse_schema_ok(schema))
        .unwrap_or_else(|e| panic!("Failed to build registry: {e}"))
}

pub fn generate_ok(schema: &str, name: &str, sql: &str, kind: QueryKind) -> GeneratedQuery {
    generate(name, &parse(sql), kind, &registry(schema))
        .unwrap_or_else(|e| panic!("Failed to generate {name}: {e}"))
}
