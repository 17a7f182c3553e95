//! Wire types for the request/response boundary.
//!
//! Requests are internally tagged by `op`; field names are camelCase so a
//! JavaScript front-end can talk to the boundary without translation.

use crate::enumerate::ProjectImage;
use crate::error::ProjectError;
use crate::manifest::Manifest;
use crate::reconcile::CleanupReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// One operation requested by a UI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Ask the user for a project directory
    ChooseDirectory,
    /// Read `project.json`
    LoadManifest {
        /// Project directory
        directory: PathBuf,
    },
    /// Replace `project.json`
    SaveManifest {
        /// Complete manifest to persist
        manifest: Manifest,
        /// Project directory
        directory: PathBuf,
    },
    /// Replace `project.json`, blocking the caller until written
    SaveManifestSync {
        /// Complete manifest to persist
        manifest: Manifest,
        /// Project directory
        directory: PathBuf,
    },
    /// Copy an external file into the project
    CopyFile {
        /// File to copy
        source_path: PathBuf,
        /// Destination path
        dest_path: PathBuf,
    },
    /// Write raw bytes to a path
    WriteFile {
        /// File content
        bytes: Vec<u8>,
        /// Destination path
        dest_path: PathBuf,
    },
    /// Delete a file
    DeleteFile {
        /// File to delete
        path: PathBuf,
    },
    /// Enumerate images present both in the manifest and on disk
    ListProjectImages {
        /// Project directory
        directory: PathBuf,
    },
    /// Check whether a directory can host a new project
    IsDirectoryEmpty {
        /// Candidate directory
        directory: PathBuf,
    },
    /// Reconcile manifest and directory
    CleanupProject {
        /// Project directory
        directory: PathBuf,
        /// Report without changing anything
        #[serde(default)]
        dry_run: bool,
    },
    /// Write `exported_data.json`
    ExportAll {
        /// Arbitrary export payload
        data: Value,
        /// Project directory
        directory: PathBuf,
    },
}

impl Request {
    /// Operation name as it appears on the wire.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::ChooseDirectory => "chooseDirectory",
            Self::LoadManifest { .. } => "loadManifest",
            Self::SaveManifest { .. } => "saveManifest",
            Self::SaveManifestSync { .. } => "saveManifestSync",
            Self::CopyFile { .. } => "copyFile",
            Self::WriteFile { .. } => "writeFile",
            Self::DeleteFile { .. } => "deleteFile",
            Self::ListProjectImages { .. } => "listProjectImages",
            Self::IsDirectoryEmpty { .. } => "isDirectoryEmpty",
            Self::CleanupProject { .. } => "cleanupProject",
            Self::ExportAll { .. } => "exportAll",
        }
    }
}

/// Result of one request. Only the fields relevant to the operation are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Whether the operation succeeded
    pub success: bool,

    /// Loaded manifest (`loadManifest`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Manifest>,

    /// Enumerated images (`listProjectImages`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ProjectImage>>,

    /// Chosen directory (`chooseDirectory`), absent when cancelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Emptiness verdict (`isDirectoryEmpty`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,

    /// Cleanup outcome (`cleanupProject`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<CleanupReport>,

    /// Written file (`exportAll`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// The manifest or file was absent
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub not_found: bool,

    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Machine-readable error kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl Response {
    /// Plain success.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Failure built from a [`ProjectError`].
    #[must_use]
    pub fn failure(error: &ProjectError) -> Self {
        Self {
            success: false,
            not_found: error.is_not_found(),
            error: Some(error.to_string()),
            error_kind: Some(error.kind().to_string()),
            ..Self::default()
        }
    }

    /// Failure not tied to a project error (bad request, picker failure).
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            error_kind: Some("request".to_string()),
            ..Self::default()
        }
    }
}
