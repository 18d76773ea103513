//! End-to-end tests: config loading, generation and the binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use shogunc::inspect::{queries_json, schema_json};
use shogunc::{compile, generate, write, Config, Error};

const SCHEMA: &str = r#"
CREATE TYPE "Role" AS ENUM ('admin', 'user');

CREATE TABLE "users" (
    "id" UUID PRIMARY KEY,
    "email" VARCHAR(255) NOT NULL UNIQUE,
    "role" "Role" NOT NULL DEFAULT "Role" 'user',
    "created_at" TIMESTAMP NOT NULL DEFAULT now()
);
"#;

const USERS_SQL: &str = "\
-- name: GetUser :one
SELECT * FROM users WHERE id = $1;

-- name: ListUsers :many
SELECT id, email FROM users WHERE role = $1 LIMIT 50;
";

const WRITES_SQL: &str = "\
-- name: CreateUser :one
INSERT INTO users (id, email, role) VALUES ($1, $2, $3) RETURNING *;
";

fn project(dir: &Path, driver: &str) {
    fs::create_dir_all(dir.join("queries/writes")).unwrap();
    fs::write(dir.join("schema.sql"), SCHEMA).unwrap();
    fs::write(dir.join("queries/users.sql"), USERS_SQL).unwrap();
    fs::write(dir.join("queries/writes/create.sql"), WRITES_SQL).unwrap();
    fs::write(
        dir.join("shogunc.yml"),
        format!(
            "sql:\n  schema: schema.sql\n  queries: queries\n  driver: {driver}\n  output: internal/db/queries.go\n  package: store\n"
        ),
    )
    .unwrap();
}

#[test]
fn generate_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "postgres");

    let config = Config::load(Config::discover(dir.path()).unwrap()).unwrap();
    let output = generate(&config.sql).unwrap();
    write(&output).unwrap();

    let queries = fs::read_to_string(dir.path().join("internal/db/queries.go")).unwrap();
    let db = fs::read_to_string(dir.path().join("internal/db/db.go")).unwrap();

    assert!(queries.starts_with("// Code generated by shogunc. DO NOT EDIT.\n\npackage store\n"));
    assert!(queries.contains("type Role string"));
    assert!(queries.contains("type Users struct {"));
    assert!(queries.contains("func (q *Queries) GetUser(ctx context.Context, params GetUserParams) (Users, error) {"));
    assert!(queries.contains("func (q *Queries) ListUsers(ctx context.Context, params ListUsersParams) ([]Users, error) {"));
    assert!(queries.contains("\tRole Role `json:\"role\"`\n"));
    // sorted walk puts users.sql before writes/create.sql
    assert!(queries.find("GetUser(").unwrap() < queries.find("CreateUser(").unwrap());
    assert!(db.starts_with("// Code generated by shogunc. DO NOT EDIT.\n\npackage store\n"));
    assert!(db.contains("NewFromPool"));
}

#[test]
fn failed_generation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "sqlite3");
    fs::write(
        dir.path().join("queries/writes/broken.sql"),
        "-- name: Broken :one\nSELECT * FROM ghosts;\n",
    )
    .unwrap();

    let config = Config::load(dir.path().join("shogunc.yml")).unwrap();
    let err = generate(&config.sql).unwrap_err();
    match err {
        Error::Core(core) => {
            assert_eq!(core.root(), &shogunc_core::Error::UnknownTable("ghosts".into()));
        }
        other => panic!("Expected core error, got {other:?}"),
    }
    assert!(!dir.path().join("internal").exists());
}

#[test]
fn failed_write_leaves_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "postgres");
    fs::write(dir.path().join("blocker"), "not a directory").unwrap();

    let config = Config::load(dir.path().join("shogunc.yml")).unwrap();
    let mut output = generate(&config.sql).unwrap();
    output.db_path = dir.path().join("blocker/db.go");

    match write(&output).unwrap_err() {
        Error::Io { path, .. } => assert_eq!(path, dir.path().join("blocker")),
        other => panic!("Expected IO error, got {other:?}"),
    }
    assert!(!output.queries_path.exists());
    let out_dir = dir.path().join("internal/db");
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn write_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "sqlite3");
    fs::create_dir_all(dir.path().join("internal/db")).unwrap();
    fs::write(dir.path().join("internal/db/queries.go"), "stale").unwrap();

    let config = Config::load(dir.path().join("shogunc.yml")).unwrap();
    let output = generate(&config.sql).unwrap();
    write(&output).unwrap();

    let queries = fs::read_to_string(&output.queries_path).unwrap();
    assert_eq!(queries, output.sources.queries);
    assert_eq!(fs::read_dir(dir.path().join("internal/db")).unwrap().count(), 2);
}

#[test]
fn duplicate_names_across_files() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "sqlite3");
    fs::write(
        dir.path().join("queries/zz.sql"),
        "-- name: GetUser :one\nSELECT * FROM users WHERE email = $1;\n",
    )
    .unwrap();

    let config = Config::load(dir.path().join("shogunc.yml")).unwrap();
    let err = compile(&config.sql).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(shogunc_core::Error::DuplicateQuery { ref name, .. }) if name == "GetUser"
    ));
}

#[test]
fn missing_config() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::discover(dir.path()),
        Err(Error::MissingConfig(_))
    ));
}

#[test]
fn inspect_json() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "sqlite");
    let config = Config::load(dir.path().join("shogunc.yml")).unwrap();

    let schema: serde_json::Value = serde_json::from_str(&schema_json(&config.sql).unwrap()).unwrap();
    assert_eq!(schema[0]["kind"], "enum");
    assert_eq!(schema[1]["kind"], "table");
    assert_eq!(schema[1]["name"], "users");

    let queries: serde_json::Value =
        serde_json::from_str(&queries_json(&config.sql).unwrap()).unwrap();
    assert_eq!(queries.as_array().unwrap().len(), 3);
    assert_eq!(queries[0]["name"], "GetUser");
    assert_eq!(queries[0]["statement"]["kind"], "select");
}

#[test]
fn binary_dry_run_prints_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "sqlite3");

    let out = Command::new(env!("CARGO_BIN_EXE_shogunc"))
        .current_dir(dir.path())
        .args(["generate", "--dry-run"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("func (q *Queries) CreateUser("));
    assert!(stdout.contains("func NewFromDB(db *sql.DB) *Queries {"));
    assert!(!dir.path().join("internal").exists());
}

#[test]
fn binary_generate_and_check() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path(), "postgres");
    let config = dir.path().join("shogunc.yml");

    let status = Command::new(env!("CARGO_BIN_EXE_shogunc"))
        .arg("--config")
        .arg(&config)
        .arg("check")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!dir.path().join("internal").exists());

    let status = Command::new(env!("CARGO_BIN_EXE_shogunc"))
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("internal/db/queries.go").is_file());
    assert!(dir.path().join("internal/db/db.go").is_file());
}
