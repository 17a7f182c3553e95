use crate::error::{ProjectError, ProjectResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Ensures parent directories exist for a given path
///
/// # Errors
///
/// Returns an error if the parent directories cannot be created
pub fn ensure_parent_dirs(path: &Path) -> ProjectResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ProjectError::io_strict("create parent directories for", path, e))?;
    }
    Ok(())
}

/// Writes `bytes` to `path` by writing a sibling temporary file and renaming
/// it over the destination, so readers never observe a half-written file.
///
/// Parent directories are created as needed. Existing permissions of the
/// destination are carried over to the replacement.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written,
/// flushed or renamed into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ProjectResult<()> {
    ensure_parent_dirs(path)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| ProjectError::io_strict("create temporary file in", parent, e))?;
    tmp.write_all(bytes)
        .map_err(|e| ProjectError::io_strict("write", tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ProjectError::io_strict("sync", tmp.path(), e))?;

    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions())
            .map_err(|e| ProjectError::io_strict("set permissions on", tmp.path(), e))?,
        Err(_) => set_default_permissions(tmp.path())?,
    }

    tmp.persist(path)
        .map_err(|e| ProjectError::io_strict("replace", path, e.error))?;
    Ok(())
}

/// Writes `bytes` to `path` in place, truncating any previous content.
///
/// # Errors
///
/// Returns an error if the parent directories cannot be created or the
/// write fails.
pub fn write_direct(path: &Path, bytes: &[u8]) -> ProjectResult<()> {
    ensure_parent_dirs(path)?;
    fs::write(path, bytes).map_err(|e| ProjectError::io_strict("write", path, e))
}

/// Temporary files are created owner-only; relax to the usual file mode.
#[cfg(unix)]
fn set_default_permissions(path: &Path) -> ProjectResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .map_err(|e| ProjectError::io_strict("set permissions on", path, e))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_default_permissions(_path: &Path) -> ProjectResult<()> {
    Ok(())
}

/// Returns the UTF-8 file name component of `path`, if any.
#[must_use]
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_parent_dirs() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let nested_file = temp_dir.path().join("a/b/c/file.png");

        ensure_parent_dirs(&nested_file)?;
        assert!(temp_dir.path().join("a/b/c").is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_parent_dirs_bare_name() -> anyhow::Result<()> {
        // No parent component at all: nothing to create
        ensure_parent_dirs(Path::new("file.png"))?;
        Ok(())
    }

    #[test]
    fn test_write_atomic_creates_and_replaces() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("nested/project.json");

        write_atomic(&target, b"first")?;
        assert_eq!(fs::read(&target)?, b"first");

        write_atomic(&target, b"second")?;
        assert_eq!(fs::read(&target)?, b"second");

        // No temporary files left behind
        let leftovers = fs::read_dir(temp_dir.path().join("nested"))?.count();
        assert_eq!(leftovers, 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("project.json");
        fs::write(&target, b"{}")?;
        fs::set_permissions(&target, fs::Permissions::from_mode(0o640))?;

        write_atomic(&target, b"{\"images\": []}")?;
        let mode = fs::metadata(&target)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        Ok(())
    }

    #[test]
    fn test_write_direct() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("x/y.bin");
        write_direct(&target, &[1, 2, 3])?;
        assert_eq!(fs::read(&target)?, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_file_name_str() {
        assert_eq!(file_name_str(Path::new("/a/b/cat.png")), Some("cat.png"));
        assert_eq!(file_name_str(Path::new("/")), None);
    }
}
