//! Error types for the shogunc command-line tool.

use std::path::PathBuf;

/// Errors raised while loading configuration, reading inputs or writing
/// generated files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file is malformed or incomplete.
    #[error("Invalid config '{path}': {message}")]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// No configuration file was found.
    #[error("No shogunc.yml or shogunc.yaml found in {0}")]
    MissingConfig(PathBuf),

    /// Reading or writing a file failed.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for its schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serializing inspection output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsing or generation failed.
    #[error(transparent)]
    Core(#[from] shogunc_core::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for the command-line tool.
pub type Result<T> = std::result::Result<T, Error>;
