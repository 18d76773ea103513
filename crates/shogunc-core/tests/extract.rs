//! Tests for splitting annotated query files into blocks.

use shogunc_core::{extract_query_blocks, Error, QueryKind};

const FILE: &str = "\
-- helpers for the users table
-- name: getUser :one
SELECT * FROM users
WHERE id = $1;

-- name: ListUsers :many
SELECT * FROM users;
-- name: Purge :sometimes
SELECT * FROM users;
";

#[test]
fn blocks_in_file_order() {
    let blocks = extract_query_blocks(FILE, "users.sql");
    let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["GetUser", "ListUsers", "Purge"]);
    assert!(blocks.iter().all(|b| b.file_name == "users.sql"));
}

#[test]
fn block_sql_runs_to_next_tag() {
    let blocks = extract_query_blocks(FILE, "users.sql");
    assert_eq!(blocks[0].sql, "SELECT * FROM users\nWHERE id = $1;\n\n");
    assert_eq!(blocks[1].sql, "SELECT * FROM users;\n");
}

#[test]
fn kinds_are_checked_lazily() {
    let blocks = extract_query_blocks(FILE, "users.sql");
    assert_eq!(blocks[0].kind().unwrap(), QueryKind::One);
    assert_eq!(blocks[1].kind().unwrap(), QueryKind::Many);
    assert_eq!(
        blocks[2].kind().unwrap_err(),
        Error::UnsupportedQueryKind("sometimes".into())
    );
}

#[test]
fn untagged_file_is_empty() {
    assert!(extract_query_blocks("SELECT 1;\n", "loose.sql").is_empty());
    assert!(extract_query_blocks("", "empty.sql").is_empty());
}
