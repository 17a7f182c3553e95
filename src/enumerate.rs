//! Read-only view of the images a project currently has.
//!
//! Joins each manifest entry with the file's metadata. Entries whose files
//! are missing are left out of the result but stay in the manifest: this
//! module never writes anything.

use crate::error::{ProjectError, ProjectResult};
use crate::manifest::{ImageEntry, Manifest};
use crate::utils::thread_pool;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{Level, debug, span, warn};

/// An image that is both referenced by the manifest and present on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImage {
    /// File name as recorded in the manifest
    pub name: String,
    /// Full path inside the project directory
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Birth time, when the platform reports one
    pub created: Option<DateTime<Utc>>,
}

/// List the images of the project in `directory`, in manifest order.
///
/// A directory without a manifest yields an empty list.
///
/// # Errors
///
/// Returns an error if the manifest exists but cannot be read or parsed.
/// Problems with individual image files never fail the call.
pub fn list_project_images(directory: &Path) -> ProjectResult<Vec<ProjectImage>> {
    let span = span!(Level::DEBUG, "list_project_images", dir = %directory.display());
    let _enter = span.enter();

    let Some(manifest) = Manifest::load_optional(directory)? else {
        debug!("no manifest, nothing to list");
        return Ok(Vec::new());
    };

    Ok(existing_images(&manifest, directory))
}

/// Stat every entry of `manifest` against `directory`, keeping those that exist.
///
/// Entries are inspected in parallel; the result keeps manifest order.
#[must_use]
pub fn existing_images(manifest: &Manifest, directory: &Path) -> Vec<ProjectImage> {
    let images: Vec<ProjectImage> = thread_pool::run_in_pool(|| {
        manifest
            .images
            .par_iter()
            .filter_map(|entry| match stat_entry(entry, directory) {
                Ok(image) => Some(image),
                Err(ProjectError::NotFound { .. }) => None,
                Err(e) => {
                    warn!("skipping {}: {e}", entry.file_name);
                    None
                }
            })
            .collect()
    });

    debug!(
        listed = images.len(),
        missing = manifest.images.len() - images.len(),
        "enumerated project images"
    );
    images
}

fn stat_entry(entry: &ImageEntry, directory: &Path) -> ProjectResult<ProjectImage> {
    let path = directory.join(&entry.file_name);
    // Only files directly inside the directory belong to the project
    if !is_plain_name(&entry.file_name) {
        return Err(ProjectError::NotFound { path });
    }
    let meta = fs::metadata(&path).map_err(|e| ProjectError::io("stat", &path, e))?;

    if !meta.is_file() {
        return Err(ProjectError::NotFound { path });
    }

    Ok(ProjectImage {
        name: entry.file_name.clone(),
        size: meta.len(),
        created: meta.created().ok().map(DateTime::<Utc>::from),
        path,
    })
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::manifest_path;
    use filetime::FileTime;
    use tempfile::tempdir;

    fn manifest_with(names: &[&str]) -> Manifest {
        let mut manifest = Manifest::new();
        for name in names {
            manifest.images.push(ImageEntry::new(*name));
        }
        manifest
    }

    #[test]
    fn test_no_manifest_is_empty() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("stray.png"), b"x")?;
        assert!(list_project_images(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_files_are_skipped_in_order() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["c.png", "missing.png", "a.png", "b.png"]).save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"aa")?;
        fs::write(dir.path().join("b.png"), b"bbb")?;
        fs::write(dir.path().join("c.png"), b"c")?;

        let images = list_project_images(dir.path())?;
        let names: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["c.png", "a.png", "b.png"]);

        assert_eq!(images[1].size, 2);
        assert_eq!(images[1].path, dir.path().join("a.png"));
        Ok(())
    }

    #[test]
    fn test_directory_entry_is_skipped() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["folder.png"]).save(dir.path())?;
        fs::create_dir(dir.path().join("folder.png"))?;

        assert!(list_project_images(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_manifest_propagates() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(manifest_path(dir.path()), b"{\"images\": 5}")?;

        let err = list_project_images(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::CorruptManifest { .. }));
        Ok(())
    }

    #[test]
    fn test_manifest_untouched() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["gone.png"]).save(dir.path())?;
        let before = fs::read(manifest_path(dir.path()))?;

        list_project_images(dir.path())?;
        assert_eq!(fs::read(manifest_path(dir.path()))?, before);
        Ok(())
    }

    #[test]
    fn test_listing_keeps_manifest_mtime() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["here.png", "gone.png", "also-gone.jpg"]).save(dir.path())?;
        fs::write(dir.path().join("here.png"), b"h")?;

        let path = manifest_path(dir.path());
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&path, old)?;

        let images = list_project_images(dir.path())?;
        assert_eq!(images.len(), 1);

        let meta = fs::metadata(&path)?;
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
        Ok(())
    }

    #[test]
    fn test_nested_and_parent_names_are_skipped() -> anyhow::Result<()> {
        let root = tempdir()?;
        let dir = root.path().join("project");
        fs::create_dir_all(dir.join("sub"))?;
        fs::write(dir.join("sub/a.png"), b"a")?;
        fs::write(root.path().join("x.png"), b"x")?;
        fs::write(dir.join("top.png"), b"t")?;
        manifest_with(&["sub/a.png", "../x.png", "top.png"]).save(&dir)?;

        let names: Vec<_> = list_project_images(&dir)?
            .into_iter()
            .map(|img| img.name)
            .collect();
        assert_eq!(names, ["top.png"]);
        Ok(())
    }
}
