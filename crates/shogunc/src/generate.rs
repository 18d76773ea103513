//! Generation runs: read inputs, compile, then write both Go files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use shogunc_core::{GeneratedSources, Pipeline};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::SqlConfig;
use crate::discover::query_files;
use crate::error::{Error, Result};

/// Generated text and where it goes.
#[derive(Debug, Clone)]
pub struct Output {
    pub queries_path: PathBuf,
    pub db_path: PathBuf,
    pub sources: GeneratedSources,
}

/// Reads the schema and every query file, compiling them in path order.
///
/// # Errors
///
/// Returns `Error::Io` for unreadable inputs and `Error::Core` for the
/// first schema or query failure.
pub fn compile(sql: &SqlConfig) -> Result<Pipeline> {
    let schema = read(&sql.schema)?;
    let mut pipeline = Pipeline::new(&schema)?;
    info!(
        "Loaded schema {} ({} declarations)",
        sql.schema.display(),
        pipeline.registry().len()
    );

    for file in query_files(&sql.queries)? {
        let text = read(&file)?;
        let name = file.display().to_string();
        let count = pipeline.add_query_file(&name, &text)?;
        debug!("Compiled {count} queries from {name}");
    }
    info!("Compiled {} queries", pipeline.queries().len());
    Ok(pipeline)
}

/// Compiles and renders without touching the filesystem outputs.
///
/// # Errors
///
/// See [`compile`].
pub fn generate(sql: &SqlConfig) -> Result<Output> {
    let pipeline = compile(sql)?;
    let sources = pipeline.render(&sql.package, sql.driver)?;
    Ok(Output {
        queries_path: sql.output.clone(),
        db_path: sql.db_output(),
        sources,
    })
}

/// Writes both files, creating parent directories.
///
/// Both files are staged as temporary siblings first and only renamed into
/// place once every write succeeded.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or file cannot be written.
pub fn write(output: &Output) -> Result<()> {
    let mut staged = Vec::with_capacity(2);
    for (path, text) in [
        (&output.queries_path, &output.sources.queries),
        (&output.db_path, &output.sources.db),
    ] {
        staged.push((path, stage(path, text)?));
    }

    for (path, file) in staged {
        file.persist(path)
            .map_err(|e| Error::io(path.as_path(), e.error))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn stage(path: &Path, text: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::io(file.path(), e))?;
    debug!("Staged {} at {}", path.display(), file.path().display());
    Ok(file)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
