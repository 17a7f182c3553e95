//! Single-file transfer operations.
//!
//! Each operation touches exactly one file and can be retried safely. There
//! is no atomicity across files: a caller copying ten images and then saving
//! the manifest must cope with a failure halfway through. Running
//! [`crate::reconcile::cleanup`] afterwards removes anything left dangling.

use crate::error::{ProjectError, ProjectResult};
use crate::utils::paths;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Copy `source` to `destination`, creating intermediate directories and
/// overwriting an existing destination.
///
/// Returns the number of bytes copied. When `source` and `destination`
/// resolve to the same file nothing is written and the file's size is
/// returned.
///
/// # Errors
///
/// - [`ProjectError::NotFound`] if `source` does not exist
/// - [`ProjectError::Io`] for any other failure
pub fn copy_into(source: &Path, destination: &Path) -> ProjectResult<u64> {
    let meta = fs::metadata(source).map_err(|e| ProjectError::io("read", source, e))?;
    if meta.is_dir() {
        return Err(ProjectError::io_strict(
            "copy",
            source,
            std::io::Error::other("source is a directory"),
        ));
    }

    if is_same_file(source, destination) {
        debug!(path = %source.display(), "source is already the destination");
        return Ok(meta.len());
    }

    paths::ensure_parent_dirs(destination)?;
    let bytes = fs::copy(source, destination)
        .map_err(|e| ProjectError::io_strict("copy to", destination, e))?;

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "copied file into project"
    );
    Ok(bytes)
}

/// `fs::copy` onto the source itself truncates it before reading.
fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write an in-memory buffer to `destination`, creating intermediate
/// directories and replacing any existing file.
///
/// # Errors
///
/// Returns [`ProjectError::Io`] if the directories or file cannot be written.
pub fn write_buffer(bytes: &[u8], destination: &Path) -> ProjectResult<()> {
    paths::write_atomic(destination, bytes)?;
    debug!(destination = %destination.display(), bytes = bytes.len(), "wrote buffer");
    Ok(())
}

/// Delete the file at `path`.
///
/// # Errors
///
/// - [`ProjectError::NotFound`] if nothing exists at `path` ("already gone")
/// - [`ProjectError::Io`] if removal fails, including when `path` is a directory
pub fn delete(path: &Path) -> ProjectResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| ProjectError::io("inspect", path, e))?;
    if meta.is_dir() {
        return Err(ProjectError::io_strict(
            "delete",
            path,
            std::io::Error::other("path is a directory"),
        ));
    }

    fs::remove_file(path).map_err(|e| ProjectError::io("delete", path, e))?;
    debug!(path = %path.display(), "deleted file");
    Ok(())
}
