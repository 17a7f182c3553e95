use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Source of a user-chosen project directory.
///
/// `Ok(None)` means the user cancelled.
pub trait DirectoryPicker: Send + Sync {
    /// Ask for a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be obtained or is not a directory.
    fn choose_directory(&self) -> Result<Option<PathBuf>>;
}

/// Always answers with the same directory, or cancels when it has none.
///
/// Used by non-interactive front-ends where stdin is taken by requests.
#[derive(Debug, Clone, Default)]
pub struct FixedPicker {
    /// Answer to give
    pub directory: Option<PathBuf>,
}

impl FixedPicker {
    /// Picker that answers `directory`.
    #[must_use]
    pub const fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }
}

impl DirectoryPicker for FixedPicker {
    fn choose_directory(&self) -> Result<Option<PathBuf>> {
        Ok(self.directory.clone())
    }
}

/// Prompts on the terminal and reads one line from stdin.
///
/// An empty answer cancels.
#[derive(Debug, Clone, Default)]
pub struct PromptPicker;

impl DirectoryPicker for PromptPicker {
    fn choose_directory(&self) -> Result<Option<PathBuf>> {
        eprint!("Project directory (empty to cancel): ");
        io::stderr().flush().ok();

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read directory from stdin")?;

        let Some(path) = parse_choice(&line)? else {
            return Ok(None);
        };
        if !path.is_dir() {
            anyhow::bail!("Not a directory: {}", path.display());
        }
        Ok(Some(path))
    }
}

/// Interpret a typed answer: trimmed, `~` expanded, empty meaning cancel.
///
/// # Errors
///
/// Never fails for non-empty input; the `Result` mirrors [`expand_tilde`].
pub fn parse_choice(line: &str) -> Result<Option<PathBuf>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    expand_tilde(trimmed).map(Some)
}
