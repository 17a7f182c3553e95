//! Reading and writing `project.json`.
//!
//! `save` never merges: callers load, modify, and hand back the complete
//! manifest. Concurrent `save`/`cleanup` on the same directory is not
//! supported; the last writer wins.

use super::Manifest;
use crate::MANIFEST_FILE;
use crate::error::{ProjectError, ProjectResult};
use crate::utils::paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the manifest file is replaced on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Write a temporary sibling file and rename it over the manifest.
    #[default]
    Atomic,
    /// Truncate and rewrite the manifest in place.
    Direct,
}

impl SaveMode {
    /// Picks the mode from the `core.atomic_save` setting.
    #[must_use]
    pub const fn from_atomic(atomic: bool) -> Self {
        if atomic { Self::Atomic } else { Self::Direct }
    }
}

/// Path of the manifest file for a project directory.
#[must_use]
pub fn manifest_path(directory: &Path) -> PathBuf {
    directory.join(MANIFEST_FILE)
}

impl Manifest {
    /// Load the manifest of `directory`.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::NotFound`] if `project.json` does not exist
    /// - [`ProjectError::CorruptManifest`] if it exists but does not parse
    /// - [`ProjectError::Io`] if it cannot be read
    pub fn load(directory: &Path) -> ProjectResult<Self> {
        let path = manifest_path(directory);
        let data = fs::read(&path).map_err(|e| ProjectError::io("read", &path, e))?;
        Self::from_slice(&data, &path)
    }

    /// Like [`Manifest::load`], but maps `NotFound` to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    pub fn load_optional(directory: &Path) -> ProjectResult<Option<Self>> {
        match Self::load(directory) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(ProjectError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Parses manifest bytes; `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::CorruptManifest`] on any parse failure.
    pub fn from_slice(data: &[u8], path: &Path) -> ProjectResult<Self> {
        serde_json::from_slice(data).map_err(|source| ProjectError::CorruptManifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pretty-printed JSON (2-space indent, trailing newline).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut data = serde_json::to_vec_pretty(self)?;
        data.push(b'\n');
        Ok(data)
    }

    /// Save the manifest into `directory`, blocking until the file is written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, directory: &Path) -> ProjectResult<()> {
        self.save_with(directory, SaveMode::Atomic)
    }

    /// Save the manifest using an explicit [`SaveMode`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_with(&self, directory: &Path, mode: SaveMode) -> ProjectResult<()> {
        let path = manifest_path(directory);
        let data = self.to_pretty_json().map_err(|e| {
            ProjectError::io_strict("serialize manifest for", &path, io::Error::other(e))
        })?;

        match mode {
            SaveMode::Atomic => paths::write_atomic(&path, &data)?,
            SaveMode::Direct => paths::write_direct(&path, &data)?,
        }

        debug!(
            path = %path.display(),
            images = self.images.len(),
            bytes = data.len(),
            "manifest saved"
        );
        Ok(())
    }
}

/// Save on the async runtime's blocking pool.
///
/// Same semantics as [`Manifest::save_with`]; only the scheduling differs.
///
/// # Errors
///
/// Returns an error if the write fails or the blocking task is lost.
pub async fn save_async(
    manifest: Manifest,
    directory: PathBuf,
    mode: SaveMode,
) -> ProjectResult<()> {
    let path = manifest_path(&directory);
    tokio::task::spawn_blocking(move || manifest.save_with(&directory, mode))
        .await
        .map_err(|e| ProjectError::io_strict("save", &path, io::Error::other(e)))?
}
