use crate::error::ProjectError;
use crate::manifest::Manifest;
use crate::{LabelContext, output, transfer};
use anyhow::{Context, Result};
use std::path::Path;

/// Remove images from the manifest and delete their files.
///
/// The manifest is saved before any file is deleted: if deletion fails
/// halfway, the leftovers are orphans that the next cleanup removes.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or saved, or none of the
/// names were in the manifest.
pub fn execute(
    ctx: &LabelContext,
    directory: &Path,
    names: &[String],
    keep_files: bool,
) -> Result<()> {
    let mut manifest = Manifest::load_optional(directory)?
        .with_context(|| format!("No project in {}", directory.display()))?;

    let mut removed = Vec::new();
    for name in names {
        if manifest.remove_image(name) > 0 {
            removed.push(name.as_str());
        } else {
            output::warning(&format!("{name} is not in the project"));
        }
    }

    if removed.is_empty() {
        anyhow::bail!("No matching images in the project");
    }
    manifest.save_with(directory, ctx.config.save_mode())?;

    for name in &removed {
        if keep_files {
            output::action("untracked", name);
            continue;
        }
        match transfer::delete(&directory.join(name)) {
            Ok(()) => output::action("removed", name),
            Err(ProjectError::NotFound { .. }) => {
                output::action("removed", &format!("{name} (file already gone)"));
            }
            Err(e) => output::warning(&format!("Failed to delete {name}: {e}")),
        }
    }

    output::success(&format!("Removed {} image(s)", removed.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ImageEntry;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_remove_entry_and_file() -> Result<()> {
        let dir = tempdir()?;
        let ctx = LabelContext::new_explicit(dir.path().join("config.toml"))?;
        let mut manifest = Manifest::new();
        manifest.push_image(ImageEntry::new("a.png"));
        manifest.push_image(ImageEntry::new("b.png"));
        manifest.save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;
        fs::write(dir.path().join("b.png"), b"b")?;

        execute(&ctx, dir.path(), &["a.png".to_string(), "zzz.png".to_string()], false)?;

        assert!(!dir.path().join("a.png").exists());
        assert!(dir.path().join("b.png").exists());
        let names: Vec<_> = Manifest::load(dir.path())?
            .images
            .into_iter()
            .map(|i| i.file_name)
            .collect();
        assert_eq!(names, ["b.png"]);
        Ok(())
    }

    #[test]
    fn test_remove_keep_files() -> Result<()> {
        let dir = tempdir()?;
        let ctx = LabelContext::new_explicit(dir.path().join("config.toml"))?;
        let mut manifest = Manifest::new();
        manifest.push_image(ImageEntry::new("a.png"));
        manifest.save(dir.path())?;
        fs::write(dir.path().join("a.png"), b"a")?;

        execute(&ctx, dir.path(), &["a.png".to_string()], true)?;
        assert!(dir.path().join("a.png").exists());
        assert!(Manifest::load(dir.path())?.images.is_empty());
        Ok(())
    }

    #[test]
    fn test_remove_unknown_only_is_error() -> Result<()> {
        let dir = tempdir()?;
        let ctx = LabelContext::new_explicit(dir.path().join("config.toml"))?;
        Manifest::new().save(dir.path())?;
        assert!(execute(&ctx, dir.path(), &["x.png".to_string()], false).is_err());
        Ok(())
    }
}
