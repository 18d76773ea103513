//! Tests for Go generation: result shapes, params structs, enums,
//! whole files and the pipeline.

mod common;
use common::*;

use shogunc_core::codegen::{enum_decl, GoType, StructDecl};
use shogunc_core::ast::Enum;
use shogunc_core::{generate, Driver, Error, Pipeline, QueryKind, ResultShape};

fn field_names(decl: &StructDecl) -> Vec<&str> {
    decl.fields.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn get_user_single_record() {
    let query = generate_ok(
        USERS_SCHEMA,
        "GetUser",
        "SELECT * FROM users WHERE id = $1;",
        QueryKind::One,
    );
    assert_eq!(query.shape, ResultShape::Single(GoType::named("Users")));

    let params = query.params.as_ref().expect("params struct");
    assert_eq!(params.name, "GetUserParams");
    assert_eq!(params.fields.len(), 1);
    assert_eq!(params.fields[0].name, "Id");
    assert_eq!(params.fields[0].ty, GoType::String);
    assert_eq!(
        query.params_source().unwrap(),
        "type GetUserParams struct {\n\tId string `json:\"id\"`\n}"
    );

    assert_eq!(
        query.function_source(),
        "func (q *Queries) GetUser(ctx context.Context, params GetUserParams) (Users, error) {\n\
         \tquery := \"SELECT * FROM users WHERE id = $1;\"\n\
         \tvar result Users\n\
         \trow := q.db.QueryRow(ctx, query, params.Id)\n\
         \tif err := row.Scan(&result.Id, &result.Email); err != nil {\n\
         \t\treturn result, err\n\
         \t}\n\
         \treturn result, nil\n\
         }"
    );
}

#[test]
fn list_users_without_params() {
    let query = generate_ok(USERS_SCHEMA, "ListUsers", "SELECT * FROM users;", QueryKind::Many);
    assert_eq!(query.shape, ResultShape::List(GoType::named("Users")));
    assert!(query.params.is_none());
    assert_eq!(
        query.function_source(),
        "func (q *Queries) ListUsers(ctx context.Context) ([]Users, error) {\n\
         \tquery := \"SELECT * FROM users;\"\n\
         \tvar result []Users\n\
         \trows, err := q.db.Query(ctx, query)\n\
         \tif err != nil {\n\
         \t\treturn nil, err\n\
         \t}\n\
         \tdefer rows.Close()\n\
         \tfor rows.Next() {\n\
         \t\tvar item Users\n\
         \t\tif err := rows.Scan(&item.Id, &item.Email); err != nil {\n\
         \t\t\treturn nil, err\n\
         \t\t}\n\
         \t\tresult = append(result, item)\n\
         \t}\n\
         \tif err := rows.Err(); err != nil {\n\
         \t\treturn nil, err\n\
         \t}\n\
         \treturn result, nil\n\
         }"
    );
}

#[test]
fn explicit_columns_scan_in_select_order() {
    let query = generate_ok(
        USERS_SCHEMA,
        "Emails",
        "SELECT email, id FROM users;",
        QueryKind::Many,
    );
    assert!(query
        .function_source()
        .contains("rows.Scan(&item.Email, &item.Id)"));
}

#[test]
fn params_follow_ascending_position() {
    let query = generate_ok(
        USERS_SCHEMA,
        "Find",
        "SELECT * FROM users WHERE email = $2 AND id = $1;",
        QueryKind::One,
    );
    let params = query.params.as_ref().unwrap();
    assert_eq!(field_names(params), vec!["Id", "Email"]);
    assert!(query
        .function_source()
        .contains("q.db.QueryRow(ctx, query, params.Id, params.Email)"));
}

#[test]
fn position_gaps_are_renumbered() {
    let query = generate_ok(
        USERS_SCHEMA,
        "Find",
        "SELECT * FROM users WHERE id = $1 AND email = $3;",
        QueryKind::One,
    );
    let params = query.params.as_ref().unwrap();
    assert_eq!(field_names(params), vec!["Id", "Email"]);

    let source = query.function_source();
    assert!(source.contains("query := \"SELECT * FROM users WHERE id = $1 AND email = $2;\""));
    assert!(source.contains("q.db.QueryRow(ctx, query, params.Id, params.Email)"));
    assert!(!source.contains("$3"));
}

#[test]
fn insert_position_gaps_are_renumbered() {
    let query = generate_ok(
        USERS_SCHEMA,
        "CreateUser",
        "INSERT INTO users (id, email) VALUES ($5, $9);",
        QueryKind::Exec,
    );
    assert_eq!(field_names(query.params.as_ref().unwrap()), vec!["Id", "Email"]);
    assert!(query
        .function_source()
        .contains("query := \"INSERT INTO users (id, email) VALUES ($1, $2);\""));
}

#[test]
fn literal_binds_are_not_params() {
    let query = generate_ok(
        USERS_SCHEMA,
        "Admins",
        "SELECT * FROM users WHERE email = 'root@example.com';",
        QueryKind::Many,
    );
    assert!(query.params.is_none());
}

#[test]
fn insert_returning_single_record() {
    let query = generate_ok(
        USERS_SCHEMA,
        "CreateUser",
        "INSERT INTO users (email) VALUES ($1) RETURNING id, email;",
        QueryKind::One,
    );
    assert_eq!(query.shape, ResultShape::Single(GoType::named("Users")));
    let params = query.params.as_ref().unwrap();
    assert_eq!(field_names(params), vec!["Email"]);
    // email is nullable, so the insert takes a pointer
    assert_eq!(params.fields[0].ty, GoType::String.pointer());
    assert!(query
        .function_source()
        .contains("row.Scan(&result.Id, &result.Email)"));
}

#[test]
fn insert_without_returning_is_error_only() {
    let query = generate_ok(
        USERS_SCHEMA,
        "CreateUser",
        "INSERT INTO users (email) VALUES ($1);",
        QueryKind::Exec,
    );
    assert_eq!(query.shape, ResultShape::None);
    assert_eq!(query.params.as_ref().unwrap().fields.len(), 1);
    assert_eq!(
        query.function_source(),
        "func (q *Queries) CreateUser(ctx context.Context, params CreateUserParams) error {\n\
         \tquery := \"INSERT INTO users (email) VALUES ($1);\"\n\
         \treturn q.db.Exec(ctx, query, params.Email)\n\
         }"
    );
}

#[test]
fn insert_returning_many_is_list() {
    let query = generate_ok(
        USERS_SCHEMA,
        "CreateUsers",
        "INSERT INTO users (email) VALUES ($1), ($2) RETURNING *;",
        QueryKind::Many,
    );
    assert_eq!(query.shape, ResultShape::List(GoType::named("Users")));
    let params = query.params.as_ref().unwrap();
    assert_eq!(field_names(params), vec!["Email", "Email2"]);
    assert_eq!(params.fields[1].tag.as_deref(), Some("json:\"email_2\""));
}

#[test]
fn role_enum_members() {
    let decl = enum_decl(&Enum {
        name: "Role".into(),
        values: vec!["admin".into(), "user".into()],
    });
    let members: Vec<_> = decl.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(members, vec!["Role_Admin", "Role_User"]);
    assert_eq!(decl.name, "Role");
    let source = decl.to_string();
    assert!(source.contains("\tRole_Admin Role = \"admin\"\n"));
    assert!(source.contains("\tRole_User  Role = \"user\"\n"));
}

#[test]
fn enum_column_uses_enum_type() {
    let schema = r#"CREATE TYPE "Role" AS ENUM ('admin', 'user');
                    CREATE TABLE "users" ("id" UUID PRIMARY KEY, "role" "Role" NOT NULL);"#;
    let query = generate_ok(
        schema,
        "UsersByRole",
        "SELECT id FROM users WHERE role = $1;",
        QueryKind::Many,
    );
    assert_eq!(query.params.as_ref().unwrap().fields[0].ty, GoType::named("Role"));
}

#[test]
fn unknown_table() {
    let err = generate(
        "GetGhost",
        &parse("SELECT * FROM ghosts;"),
        QueryKind::One,
        &registry(USERS_SCHEMA),
    )
    .unwrap_err();
    assert_eq!(err, Error::UnknownTable("ghosts".into()));
}

#[test]
fn unknown_column() {
    let err = generate(
        "Bad",
        &parse("SELECT * FROM users WHERE name = $1;"),
        QueryKind::One,
        &registry(USERS_SCHEMA),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::UnknownColumn {
            table: "users".into(),
            column: "name".into(),
        }
    );
}

#[test]
fn exec_select_is_unimplemented() {
    let err = generate(
        "Touch",
        &parse("SELECT * FROM users;"),
        QueryKind::Exec,
        &registry(USERS_SCHEMA),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Unimplemented(_)));
}

#[test]
fn generation_is_idempotent() {
    let schema = r#"CREATE TABLE "users" ("zeta" TEXT, "alpha" INT, "mid" BOOLEAN, "created_at" TIMESTAMP);"#;
    let queries = "-- name: All :many\nSELECT * FROM users;\n\
                   -- name: One :one\nSELECT * FROM users WHERE alpha = $1;\n";
    let render = || {
        let mut pipeline = Pipeline::new(schema).unwrap();
        pipeline.add_query_file("users.sql", queries).unwrap();
        pipeline.render("db", Driver::Sqlite3).unwrap()
    };
    let first = render();
    assert_eq!(first, render());
    assert!(first
        .queries
        .contains("rows.Scan(&item.Zeta, &item.Alpha, &item.Mid, &item.CreatedAt)"));
}

#[test]
fn queries_file_layout() {
    let schema = r#"CREATE TYPE "Role" AS ENUM ('admin');
                    CREATE TABLE "users" ("id" UUID PRIMARY KEY, "seen" TIMESTAMP);"#;
    let mut pipeline = Pipeline::new(schema).unwrap();
    pipeline
        .add_query_file("users.sql", "-- name: GetUser :one\nSELECT * FROM users WHERE id = $1;\n")
        .unwrap();
    let sources = pipeline.render("store", Driver::Postgres).unwrap();
    let text = &sources.queries;

    assert!(text.starts_with(
        "// Code generated by shogunc. DO NOT EDIT.\n\npackage store\n\nimport (\n\t\"context\"\n\t\"time\"\n)\n"
    ));
    let enum_at = text.find("type Role string").unwrap();
    let row_at = text.find("type Users struct {").unwrap();
    let params_at = text.find("type GetUserParams struct {").unwrap();
    let func_at = text.find("func (q *Queries) GetUser(").unwrap();
    assert!(enum_at < row_at && row_at < params_at && params_at < func_at);
    assert!(text.contains("\tSeen *time.Time `json:\"seen\" db:\"seen\"`\n"));
    assert!(sources.db.contains("func NewFromPool(pool *pgxpool.Pool) *Queries {"));
}

#[test]
fn pipeline_rejects_duplicate_query_names() {
    let mut pipeline = Pipeline::new(USERS_SCHEMA).unwrap();
    pipeline
        .add_query_file("a.sql", "-- name: GetUser :one\nSELECT * FROM users WHERE id = $1;\n")
        .unwrap();
    let err = pipeline
        .add_query_file("b.sql", "-- name: getUser :many\nSELECT * FROM users;\n")
        .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateQuery {
            name: "GetUser".into(),
            first_file: "a.sql".into(),
            second_file: "b.sql".into(),
        }
    );
    assert_eq!(pipeline.queries().len(), 1);
}

#[test]
fn pipeline_wraps_syntax_errors() {
    let mut pipeline = Pipeline::new(USERS_SCHEMA).unwrap();
    let err = pipeline
        .add_query_file("bad.sql", "-- name: Broken :one\nSELECT * FROM;\n")
        .unwrap_err();
    assert!(matches!(err.root(), Error::Syntax(_)));
    assert!(err.to_string().starts_with("query 'Broken' in 'bad.sql': syntax error:"));
}

#[test]
fn pipeline_rejects_duplicate_declarations() {
    let err = Pipeline::new(r#"CREATE TABLE "t" ("a" INT); CREATE TYPE "T" AS ENUM ('x');"#)
        .unwrap_err();
    assert_eq!(err, Error::DuplicateDeclaration("T".into()));
}
