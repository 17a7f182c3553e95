//! Error taxonomy for project operations.
//!
//! Three kinds of failure are distinguished:
//!
//! - [`ProjectError::NotFound`]: the manifest or a file is absent. Callers
//!   usually treat this as an expected outcome rather than a failure.
//! - [`ProjectError::CorruptManifest`]: `project.json` exists but cannot be
//!   understood. Always fatal for the calling operation.
//! - [`ProjectError::Io`]: permission, disk or path errors.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by the project core.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors produced by manifest, transfer, enumeration and cleanup operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The manifest or a file does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The manifest exists but could not be parsed.
    #[error("corrupt manifest {}: {source}", path.display())]
    CorruptManifest {
        /// Path of the manifest file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Any other filesystem failure.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        /// Short verb phrase describing the attempted operation
        action: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    /// Wraps an I/O error, mapping `ErrorKind::NotFound` to [`ProjectError::NotFound`].
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                action,
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps an I/O error without the `NotFound` mapping.
    pub fn io_strict(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`ProjectError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Short machine-readable kind, used by the service boundary.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "notFound",
            Self::CorruptManifest { .. } => "corruptManifest",
            Self::Io { .. } => "io",
        }
    }
}
