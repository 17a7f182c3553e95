#![allow(dead_code)]

use anyhow::Result;
use labelproj::LabelContext;
use labelproj::manifest::{ImageEntry, Manifest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Project fixture: a temp directory holding a project and its config.
pub struct TestProject {
    pub temp_dir: TempDir,
    pub ctx: LabelContext,
}

impl TestProject {
    /// Create a project directory with an empty manifest.
    pub fn new() -> Result<Self> {
        let project = Self::bare()?;
        Manifest::new().save(&project.dir())?;
        Ok(project)
    }

    /// Create the directories but no manifest.
    pub fn bare() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("project"))?;
        let config_path = temp_dir.path().join("config/config.toml");
        let ctx = LabelContext::new_explicit(config_path)?;
        Ok(Self { temp_dir, ctx })
    }

    /// The project directory.
    pub fn dir(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// A scratch directory outside the project.
    pub fn outside(&self) -> Result<PathBuf> {
        let dir = self.temp_dir.path().join("outside");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn config_path(&self) -> &Path {
        &self.ctx.config_path
    }

    /// Write a file into the project directory.
    pub fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Save a manifest listing `names`.
    pub fn set_manifest(&self, names: &[&str]) -> Result<()> {
        let mut manifest = Manifest::new();
        for name in names {
            manifest.push_image(ImageEntry::new(*name));
        }
        manifest.save(&self.dir())?;
        Ok(())
    }

    /// File names currently in the manifest, in order.
    pub fn manifest_names(&self) -> Result<Vec<String>> {
        Ok(Manifest::load(&self.dir())?
            .images
            .into_iter()
            .map(|img| img.file_name)
            .collect())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir().join(name).exists()
    }
}
