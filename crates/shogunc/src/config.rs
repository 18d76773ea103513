//! `shogunc.yml` loading.
//!
//! ```yaml
//! sql:
//!   schema: schema.sql
//!   queries: queries/
//!   driver: postgres
//!   output: internal/db/queries.go
//!   package: db
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use shogunc_core::Driver;

use crate::error::{Error, Result};

/// File names looked up by [`Config::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["shogunc.yml", "shogunc.yaml"];

/// Name of the driver preamble written beside the output file.
pub const DB_FILE_NAME: &str = "db.go";

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sql: SqlConfig,
}

/// Inputs and outputs of one generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct SqlConfig {
    /// The schema file.
    pub schema: PathBuf,
    /// A query file, or a directory searched for `*.sql`.
    pub queries: PathBuf,
    pub driver: Driver,
    /// The generated queries file.
    pub output: PathBuf,
    /// Go package name of the generated files.
    #[serde(default = "default_package")]
    pub package: String,
}

fn default_package() -> String {
    "db".to_string()
}

impl Config {
    /// Reads, validates and resolves a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, `Error::Yaml` if it
    /// does not deserialize, and `Error::Config` if a value is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Self = serde_yaml::from_str(&text)?;
        config.validate(path)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.sql.schema = base.join(&config.sql.schema);
        config.sql.queries = base.join(&config.sql.queries);
        config.sql.output = base.join(&config.sql.output);
        Ok(config)
    }

    /// Finds the configuration file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingConfig` if neither file name exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| Error::MissingConfig(dir.to_path_buf()))
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: &str| Error::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        let sql = &self.sql;
        if sql.schema.as_os_str().is_empty() {
            return Err(invalid("sql.schema must not be empty"));
        }
        if sql.queries.as_os_str().is_empty() {
            return Err(invalid("sql.queries must not be empty"));
        }
        if sql.output.as_os_str().is_empty() {
            return Err(invalid("sql.output must not be empty"));
        }
        if sql.output.file_name().is_some_and(|name| name == DB_FILE_NAME) {
            return Err(invalid("sql.output must not be named db.go"));
        }
        if !is_go_identifier(&sql.package) {
            return Err(invalid("sql.package must be a Go identifier"));
        }
        Ok(())
    }
}

impl SqlConfig {
    /// Path of the driver preamble, beside the output file.
    #[must_use]
    pub fn db_output(&self) -> PathBuf {
        self.output.with_file_name(DB_FILE_NAME)
    }
}

fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
