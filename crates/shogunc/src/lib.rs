//! # shogunc
//!
//! Command-line front end for [`shogunc_core`]: reads `shogunc.yml`,
//! compiles the schema and query files it names, and writes the generated
//! Go package.

pub mod config;
pub mod discover;
pub mod error;
pub mod generate;
pub mod inspect;

pub use config::{Config, SqlConfig};
pub use error::{Error, Result};
pub use generate::{compile, generate, write, Output};
