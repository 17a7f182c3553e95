//! Project manifest model.
//!
//! The manifest (`project.json`) is the source of truth for "which images
//! belong to the project". Only the `images` list is interpreted here; every
//! other top-level field (labels, categories, settings, ...) is kept verbatim
//! in [`Manifest::extra`] so a load/modify/save cycle never drops
//! caller-defined data. Likewise each [`ImageEntry`] keeps its label payload
//! in [`ImageEntry::extra`].
//!
//! # Example
//!
//! ```no_run
//! use labelproj::manifest::{ImageEntry, Manifest};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = Path::new("/data/my-project");
//! let mut manifest = Manifest::load_optional(dir)?.unwrap_or_default();
//! manifest.push_image(ImageEntry::new("cat.png"));
//! manifest.save(dir)?;
//! # Ok(())
//! # }
//! ```

pub mod store;

pub use store::{SaveMode, manifest_path, save_async};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Parsed contents of `project.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Images in insertion/display order. `fileName` is the de facto key.
    #[serde(default)]
    pub images: Vec<ImageEntry>,

    /// All other top-level fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One image referenced by the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// File name relative to the project directory
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Label and metadata fields, opaque to this crate.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageEntry {
    /// Creates an entry with no label data.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extra: Map::new(),
        }
    }
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of file names referenced by `images`.
    #[must_use]
    pub fn referenced_names(&self) -> HashSet<&str> {
        self.images.iter().map(|img| img.file_name.as_str()).collect()
    }

    /// Whether any entry references `file_name`.
    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.images.iter().any(|img| img.file_name == file_name)
    }

    /// Appends an entry unless one with the same file name exists.
    ///
    /// Returns `true` if the entry was added.
    pub fn push_image(&mut self, entry: ImageEntry) -> bool {
        if self.contains(&entry.file_name) {
            return false;
        }
        self.images.push(entry);
        true
    }

    /// Removes every entry referencing `file_name`, keeping the order of the rest.
    ///
    /// Returns the number of entries removed.
    pub fn remove_image(&mut self, file_name: &str) -> usize {
        let before = self.images.len();
        self.images.retain(|img| img.file_name != file_name);
        before - self.images.len()
    }
}
