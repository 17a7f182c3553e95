#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Simple counters cannot overflow

//! # labelproj - Image Labeling Project Manager
//!
//! labelproj keeps an image-labeling project consistent. A project is a plain
//! directory holding a JSON manifest (`project.json`) and the image files the
//! manifest describes. Labels, categories and settings live in the manifest
//! and are passed through untouched; this crate only cares about which image
//! files the manifest references and which ones are actually on disk.
//!
//! ## Architecture
//!
//! - [`manifest`]: Loading and saving `project.json`, preserving unknown fields
//! - [`transfer`]: Copy, write and delete single project files
//! - [`enumerate`]: Join manifest entries with filesystem metadata
//! - [`scanner`]: Directory listing, image extension matching, emptiness check
//! - [`reconcile`]: Two-way cleanup between manifest and directory
//! - [`export`]: Writing the standalone export file
//! - [`service`]: Request/response boundary used by UI front-ends
//! - [`commands`]: CLI command implementations
//! - [`config`]: Configuration loading and editing
//! - [`output`]: Output formatting and verbosity
//!
//! ## Example Usage
//!
//! ```no_run
//! use labelproj::manifest::Manifest;
//! use labelproj::reconcile;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = Path::new("/data/my-project");
//!
//! // Make the manifest and the directory agree again
//! let report = reconcile::cleanup(dir)?;
//! println!("deleted {} orphan(s)", report.deleted.len());
//!
//! let manifest = Manifest::load(dir)?;
//! println!("{} image(s) in project", manifest.images.len());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing and management.
pub mod config;

/// Error taxonomy shared by all project operations.
pub mod error;

/// Read-only enumeration of project images.
pub mod enumerate;

/// Export file writing.
pub mod export;

/// Project manifest model and persistence.
pub mod manifest;

/// Output formatting and verbosity control.
pub mod output;

/// Manifest/directory reconciliation engine.
pub mod reconcile;

/// Directory listing and classification utilities.
pub mod scanner;

/// Request/response boundary for UI collaborators.
pub mod service;

/// Single-file copy, write and delete operations.
pub mod transfer;

/// Utility functions and helpers.
pub mod utils;

pub use error::{ProjectError, ProjectResult};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Current version of the labelproj binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/labelproj/config.toml";

/// Name of the manifest file inside a project directory.
pub const MANIFEST_FILE: &str = "project.json";

/// Name of the export file written next to the manifest.
pub const EXPORT_FILE: &str = "exported_data.json";

/// Extensions (lowercase, without dot) recognized as project images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Central context for CLI operations.
///
/// Holds the loaded configuration only. Project operations themselves take
/// the project directory as an argument and keep no state between calls.
#[derive(Debug, Clone)]
pub struct LabelContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,

    /// Whether to run in non-interactive mode (no prompts).
    /// Used primarily for testing to prevent stdin reads.
    pub non_interactive: bool,
}

impl LabelContext {
    /// Creates a new `LabelContext` by loading the configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the configuration
    /// file cannot be read or created.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("LABELPROJ_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        Self::new_explicit(config_path)
    }

    /// Creates a new `LabelContext` from an explicit configuration path.
    /// The file is created with defaults when it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;

        if let Err(e) = utils::thread_pool::configure_from_config(&config) {
            tracing::debug!("thread pool already configured: {e}");
        }

        Ok(Self {
            config_path,
            config,
            non_interactive: false,
        })
    }

    /// Resolves the project directory for a command.
    ///
    /// An explicit argument wins over `core.default_project`.
    ///
    /// # Errors
    /// Returns an error if neither an argument nor a configured default exists.
    pub fn project_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }
        self.config.core.default_project.clone().context(
            "No project directory given and core.default_project is not set \
             (use 'lproj config core.default_project <dir>')",
        )
    }
}
