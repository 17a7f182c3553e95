pub mod parser;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::manifest::SaveMode;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Project used when a command is given no directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<PathBuf>,

    /// Replace `project.json` via temp file + rename instead of in place
    #[serde(default = "default_atomic_save")]
    pub atomic_save: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_project: None,
            atomic_save: default_atomic_save(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Config {
    /// Save mode derived from `core.atomic_save`.
    #[must_use]
    pub const fn save_mode(&self) -> SaveMode {
        SaveMode::from_atomic(self.core.atomic_save)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match split_key(key)? {
            ("core", "default_project") => self
                .core
                .default_project
                .as_ref()
                .map(|p| p.display().to_string()),
            ("core", "atomic_save") => Some(self.core.atomic_save.to_string()),
            ("performance", "parallel_threads") => {
                Some(self.performance.parallel_threads.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let parts =
            split_key(key).ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {key}"))?;

        match parts {
            ("core", "default_project") => {
                self.core.default_project = Some(crate::utils::expand_tilde(&value)?);
            }
            ("core", "atomic_save") => {
                self.core.atomic_save = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            ("performance", "parallel_threads") => {
                let threads: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if threads == 0 {
                    anyhow::bail!("Parallel threads must be at least 1");
                }
                self.performance.parallel_threads = threads;
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// Unset a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or cannot be unset
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match split_key(key) {
            Some(("core", "default_project")) => self.core.default_project = None,
            Some(_) => return Err(anyhow::anyhow!("Cannot unset configuration key: {key}")),
            None => return Err(anyhow::anyhow!("Invalid configuration key: {key}")),
        }
        Ok(())
    }

    /// All known keys with their current values, in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        ["core.default_project", "core.atomic_save", "performance.parallel_threads"]
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }
}

fn split_key(key: &str) -> Option<(&str, &str)> {
    let (section, name) = key.split_once('.')?;
    if section.is_empty() || name.is_empty() || name.contains('.') {
        return None;
    }
    Some((section, name))
}

// Default functions for serde
const fn default_atomic_save() -> bool {
    true
}

fn default_parallel_threads() -> usize {
    crate::utils::thread_pool::num_cpus::get().min(8)
}
