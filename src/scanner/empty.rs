use crate::error::{ProjectError, ProjectResult};
use std::fs;
use std::path::Path;

/// OS artifacts that do not make a directory "used".
pub const IGNORED_NAMES: &[&str] = &["Thumbs.db", "desktop.ini"];

/// Hidden files (leading `.`, e.g. `.DS_Store`) and [`IGNORED_NAMES`] are noise.
#[must_use]
pub fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || IGNORED_NAMES.contains(&name)
}

/// Check whether `directory` is safe to use as a fresh project location.
///
/// # Errors
///
/// Returns an error if the directory cannot be read. Callers should treat
/// that as "not safely empty".
pub fn is_directory_empty(directory: &Path) -> ProjectResult<bool> {
    let entries =
        fs::read_dir(directory).map_err(|e| ProjectError::io_strict("read", directory, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::io_strict("read", directory, e))?;
        let name = entry.file_name();
        if !is_ignored_name(&name.to_string_lossy()) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert!(is_directory_empty(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_only_noise_files() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(".DS_Store"), b"")?;
        fs::write(dir.path().join("Thumbs.db"), b"")?;
        fs::write(dir.path().join("desktop.ini"), b"")?;
        fs::create_dir(dir.path().join(".hidden"))?;
        assert!(is_directory_empty(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_visible_file_or_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        assert!(!is_directory_empty(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_unreadable_is_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert!(is_directory_empty(&dir.path().join("missing")).is_err());
        Ok(())
    }

    #[test]
    fn test_ignored_names_are_case_sensitive() {
        assert!(is_ignored_name("Thumbs.db"));
        assert!(!is_ignored_name("thumbs.db"));
        assert!(is_ignored_name(".anything"));
    }
}
