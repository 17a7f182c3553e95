//! Two-way reconciliation between the manifest and the project directory.
//!
//! After a cleanup the project satisfies:
//!
//! - every `fileName` in the manifest names a regular file directly inside
//!   the project directory, and
//! - every recognized image file directly inside the directory is referenced
//!   by the manifest.
//!
//! The decision is made from one manifest read and one directory listing,
//! expressed as set algebra over two derived sets:
//!
//! - `referenced` - file names in the manifest that exist on disk
//! - `on_disk_images` - image files in the directory
//!
//! `on_disk_images - referenced` are orphans and get deleted; manifest
//! entries without a file are dangling and get pruned. An orphan is assumed
//! abandoned (an undone import, a copy that crashed before the manifest was
//! saved), never a pending addition.
//!
//! Callers must not run `cleanup` concurrently with `save` or another
//! `cleanup` on the same directory. No lock is taken; the last writer wins.

use crate::error::{ProjectError, ProjectResult};
use crate::manifest::{Manifest, SaveMode};
use crate::scanner::DirectoryListing;
use crate::transfer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{Level, debug, info, span};

/// What a cleanup would change, computed without touching the disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcilePlan {
    /// Image files on disk that no manifest entry references, sorted by name
    pub orphans: Vec<String>,
    /// Manifest entries whose file is missing, in manifest order
    pub dangling: Vec<String>,
}

impl ReconcilePlan {
    /// Compute the plan for a manifest against a directory snapshot.
    #[must_use]
    pub fn compute(manifest: &Manifest, listing: &DirectoryListing) -> Self {
        let referenced: HashSet<&str> = manifest
            .referenced_names()
            .into_iter()
            .filter(|name| listing.has_file(name))
            .collect();

        let orphans = listing
            .image_names
            .iter()
            .filter(|name| !referenced.contains(name.as_str()))
            .cloned()
            .collect();

        let dangling = manifest
            .images
            .iter()
            .filter(|img| !listing.has_file(&img.file_name))
            .map(|img| img.file_name.clone())
            .collect();

        Self { orphans, dangling }
    }

    /// Whether the project already satisfies the invariant.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.dangling.is_empty()
    }
}

/// Knobs for [`cleanup_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    /// Compute and report the plan without deleting or saving anything
    pub dry_run: bool,
    /// How the manifest is rewritten when it changes
    pub save_mode: SaveMode,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    /// Orphan files deleted (or that would be, on a dry run)
    pub deleted: Vec<String>,
    /// Manifest entries pruned (or that would be, on a dry run)
    pub pruned: Vec<String>,
    /// Whether `project.json` was rewritten
    pub manifest_written: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl CleanupReport {
    /// Whether anything was (or would be) changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.deleted.is_empty() || !self.pruned.is_empty()
    }
}

/// Reconcile the project in `directory` with default options.
///
/// A directory without a manifest is already clean.
///
/// # Errors
///
/// Returns an error if the manifest is corrupt or unreadable, the directory
/// cannot be listed, an orphan cannot be deleted, or the manifest cannot be
/// rewritten. Work done before the failure is not rolled back.
pub fn cleanup(directory: &Path) -> ProjectResult<CleanupReport> {
    cleanup_with(directory, &CleanupOptions::default())
}

/// Reconcile the project in `directory`.
///
/// # Errors
///
/// See [`cleanup`].
pub fn cleanup_with(directory: &Path, options: &CleanupOptions) -> ProjectResult<CleanupReport> {
    let span = span!(
        Level::DEBUG,
        "cleanup",
        dir = %directory.display(),
        dry_run = options.dry_run
    );
    let _enter = span.enter();

    let Some(mut manifest) = Manifest::load_optional(directory)? else {
        debug!("no manifest, nothing to clean");
        return Ok(CleanupReport {
            dry_run: options.dry_run,
            ..CleanupReport::default()
        });
    };

    let listing = DirectoryListing::scan(directory)?;
    let plan = ReconcilePlan::compute(&manifest, &listing);

    if options.dry_run {
        return Ok(CleanupReport {
            deleted: plan.orphans,
            pruned: plan.dangling,
            manifest_written: false,
            dry_run: true,
        });
    }

    let mut deleted = Vec::with_capacity(plan.orphans.len());
    for name in &plan.orphans {
        match transfer::delete(&listing.path_of(name)) {
            Ok(()) => deleted.push(name.clone()),
            // Already gone: nothing to reconcile
            Err(ProjectError::NotFound { .. }) => debug!("orphan {name} vanished before deletion"),
            Err(e) => return Err(e),
        }
    }

    let before = manifest.images.len();
    manifest.images.retain(|img| listing.has_file(&img.file_name));

    let manifest_written = manifest.images.len() != before;
    if manifest_written {
        manifest.save_with(directory, options.save_mode)?;
    }

    info!(
        deleted = deleted.len(),
        pruned = plan.dangling.len(),
        manifest_written,
        "project cleaned"
    );

    Ok(CleanupReport {
        deleted,
        pruned: plan.dangling,
        manifest_written,
        dry_run: false,
    })
}

/// Compute the plan for `directory` without changing anything.
///
/// Returns `None` when the directory has no manifest.
///
/// # Errors
///
/// Returns an error if the manifest is corrupt or the directory cannot be listed.
pub fn plan(directory: &Path) -> ProjectResult<Option<ReconcilePlan>> {
    let Some(manifest) = Manifest::load_optional(directory)? else {
        return Ok(None);
    };
    let listing = DirectoryListing::scan(directory)?;
    Ok(Some(ReconcilePlan::compute(&manifest, &listing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ImageEntry, manifest_path};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn manifest_with(names: &[&str]) -> Manifest {
        let mut manifest = Manifest::new();
        for name in names {
            manifest.images.push(ImageEntry::new(*name));
        }
        manifest
    }

    fn listing_with(files: &[&str]) -> DirectoryListing {
        DirectoryListing {
            root: "/project".into(),
            files: files.iter().map(|s| (*s).to_string()).collect(),
            image_names: files
                .iter()
                .filter(|s| crate::scanner::is_image_name(s))
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    #[test]
    fn test_plan_symmetric_difference() {
        let manifest = manifest_with(&["a.png", "b.png"]);
        let listing = listing_with(&["a.png", "c.png", "project.json", "notes.txt"]);

        let plan = ReconcilePlan::compute(&manifest, &listing);
        assert_eq!(plan.orphans, ["c.png"]);
        assert_eq!(plan.dangling, ["b.png"]);
        assert!(!plan.is_clean());
    }

    #[test]
    fn test_plan_clean() {
        let manifest = manifest_with(&["a.png", "b.jpg"]);
        let listing = listing_with(&["a.png", "b.jpg", "project.json"]);
        assert!(ReconcilePlan::compute(&manifest, &listing).is_clean());
    }

    #[test]
    fn test_plan_non_image_entries_are_kept_if_present() {
        // Entries are only pruned for missing files, whatever their extension
        let manifest = manifest_with(&["scan.tiff"]);
        let listing = listing_with(&["scan.tiff"]);
        assert!(ReconcilePlan::compute(&manifest, &listing).is_clean());
    }

    #[test]
    fn test_no_manifest_is_clean() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("stray.png"), b"x")?;

        let report = cleanup(dir.path())?;
        assert!(!report.changed());
        assert!(dir.path().join("stray.png").exists());
        assert!(plan(dir.path())?.is_none());
        Ok(())
    }

    #[test]
    fn test_cleanup_deletes_and_prunes() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut manifest = manifest_with(&["a.png", "b.png"]);
        manifest.images[0].extra.insert("labels".into(), json!([{"x": 1}]));
        manifest.extra.insert("categories".into(), json!(["cat"]));
        manifest.save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;
        fs::write(dir.path().join("c.png"), b"c")?;
        fs::write(dir.path().join("readme.txt"), b"keep me")?;

        let report = cleanup(dir.path())?;
        assert_eq!(report.deleted, ["c.png"]);
        assert_eq!(report.pruned, ["b.png"]);
        assert!(report.manifest_written);

        assert!(!dir.path().join("c.png").exists());
        assert!(dir.path().join("readme.txt").exists());

        let saved = Manifest::load(dir.path())?;
        assert_eq!(saved.images.len(), 1);
        assert_eq!(saved.images[0].file_name, "a.png");
        assert_eq!(saved.images[0].extra.get("labels"), Some(&json!([{"x": 1}])));
        assert_eq!(saved.extra.get("categories"), Some(&json!(["cat"])));
        Ok(())
    }

    #[test]
    fn test_orphan_only_does_not_rewrite_manifest() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["a.png"]).save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;
        fs::write(dir.path().join("orphan.GIF"), b"g")?;
        let before = fs::read(manifest_path(dir.path()))?;

        let report = cleanup(dir.path())?;
        assert_eq!(report.deleted, ["orphan.GIF"]);
        assert!(!report.manifest_written);
        assert_eq!(fs::read(manifest_path(dir.path()))?, before);
        Ok(())
    }

    #[test]
    fn test_dry_run_changes_nothing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["a.png", "b.png"]).save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;
        fs::write(dir.path().join("c.webp"), b"c")?;
        let before = fs::read(manifest_path(dir.path()))?;

        let options = CleanupOptions {
            dry_run: true,
            ..CleanupOptions::default()
        };
        let report = cleanup_with(dir.path(), &options)?;

        assert!(report.dry_run);
        assert_eq!(report.deleted, ["c.webp"]);
        assert_eq!(report.pruned, ["b.png"]);
        assert!(!report.manifest_written);
        assert!(dir.path().join("c.webp").exists());
        assert_eq!(fs::read(manifest_path(dir.path()))?, before);
        Ok(())
    }

    #[test]
    fn test_duplicate_entries_survive_when_present() -> anyhow::Result<()> {
        let dir = tempdir()?;
        manifest_with(&["a.png", "a.png"]).save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;

        let report = cleanup(dir.path())?;
        assert!(!report.changed());
        assert_eq!(Manifest::load(dir.path())?.images.len(), 2);
        Ok(())
    }

    #[test]
    fn test_corrupt_manifest_aborts_before_deleting() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(manifest_path(dir.path()), b"not json")?;
        fs::write(dir.path().join("a.png"), b"a")?;

        assert!(matches!(
            cleanup(dir.path()),
            Err(ProjectError::CorruptManifest { .. })
        ));
        assert!(dir.path().join("a.png").exists());
        Ok(())
    }
}
