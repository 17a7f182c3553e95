use crate::IMAGE_EXTENSIONS;
use crate::error::{ProjectError, ProjectResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Check whether a file name carries a recognized image extension.
///
/// Matching is case-insensitive, so `IMG_001.JPG` counts.
#[must_use]
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Snapshot of the entries directly inside one directory.
///
/// Taken once and then queried, so a reconciliation decides everything from
/// the same view of the disk.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    /// Directory that was listed
    pub root: PathBuf,
    /// Names that resolve to regular files (symlinks followed)
    pub files: BTreeSet<String>,
    /// Non-directory names with an image extension, dangling symlinks included
    pub image_names: BTreeSet<String>,
}

impl DirectoryListing {
    /// List `directory` one level deep.
    ///
    /// Entries whose names are not valid UTF-8 are skipped; a manifest can
    /// never reference them.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory itself cannot be read. Entries that
    /// vanish or cannot be inspected mid-listing are skipped.
    pub fn scan(directory: &Path) -> ProjectResult<Self> {
        let mut listing = Self {
            root: directory.to_path_buf(),
            ..Self::default()
        };

        let walker = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(ProjectError::io_strict("list", directory, source));
                }
                Err(e) => {
                    debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            let is_file = if file_type.is_symlink() {
                fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
            } else {
                file_type.is_file()
            };
            if is_file {
                listing.files.insert(name.to_string());
            }

            // A symlink to a directory is neither a file nor an image
            let points_to_dir =
                file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            if !points_to_dir && is_image_name(name) {
                listing.image_names.insert(name.to_string());
            }
        }

        debug!(
            directory = %directory.display(),
            files = listing.files.len(),
            images = listing.image_names.len(),
            "listed directory"
        );
        Ok(listing)
    }

    /// Whether `name` is a regular file in this snapshot.
    #[must_use]
    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Full path for a name inside the listed directory.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
