//! Query file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Lists the query files under `path`.
///
/// A file is returned as is. A directory is walked recursively for
/// `*.sql` files, sorted by path so output does not depend on the
/// filesystem's listing order.
///
/// # Errors
///
/// Returns `Error::Io` if `path` does not exist or cannot be walked.
pub fn query_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = path.metadata().map_err(|e| Error::io(path, e))?;
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            Error::io(at, e.into())
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("sql")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
