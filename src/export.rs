//! Standalone export file.
//!
//! The export is a separate pretty-printed JSON document next to the
//! manifest. Its contents are whatever the caller hands in; the manifest is
//! never read or modified.

use crate::EXPORT_FILE;
use crate::error::{ProjectError, ProjectResult};
use crate::utils::paths;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the export file for a project directory.
#[must_use]
pub fn export_path(directory: &Path) -> PathBuf {
    directory.join(EXPORT_FILE)
}

/// Write `data` to `exported_data.json` inside `directory`.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export_all<T: Serialize + ?Sized>(data: &T, directory: &Path) -> ProjectResult<PathBuf> {
    let path = export_path(directory);
    let mut bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| ProjectError::io_strict("serialize export for", &path, io::Error::other(e)))?;
    bytes.push(b'\n');

    paths::write_atomic(&path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, manifest_path};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_separate_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        Manifest::new().save(dir.path())?;
        let manifest_before = fs::read(manifest_path(dir.path()))?;

        let data = json!({"images": [{"fileName": "a.png", "boxes": []}]});
        let path = export_all(&data, dir.path())?;

        assert_eq!(path, dir.path().join("exported_data.json"));
        let written: serde_json::Value = serde_json::from_slice(&fs::read(&path)?)?;
        assert_eq!(written, data);
        assert_eq!(fs::read(manifest_path(dir.path()))?, manifest_before);
        Ok(())
    }

    #[test]
    fn test_export_overwrites() -> anyhow::Result<()> {
        let dir = tempdir()?;
        export_all(&json!({"v": 1}), dir.path())?;
        export_all(&json!({"v": 2}), dir.path())?;

        let text = fs::read_to_string(export_path(dir.path()))?;
        assert_eq!(text, "{\n  \"v\": 2\n}\n");
        Ok(())
    }
}
