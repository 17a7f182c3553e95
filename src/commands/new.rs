use crate::manifest::{Manifest, manifest_path};
use crate::{LabelContext, output, scanner};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create an empty project in `directory`.
///
/// Refuses a directory that already holds a manifest. A directory with
/// other visible content is only used with `force`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or inspected, is not
/// empty (without `force`), or the manifest cannot be written.
pub fn execute(ctx: &LabelContext, directory: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory: {}", directory.display()))?;

    if manifest_path(directory).exists() {
        anyhow::bail!(
            "{} already contains a project ({})",
            directory.display(),
            crate::MANIFEST_FILE
        );
    }

    let empty = scanner::is_directory_empty(directory)
        .with_context(|| format!("Failed to inspect {}", directory.display()))?;
    if !empty {
        if !force {
            anyhow::bail!(
                "{} is not empty; use --force to create the project anyway \
                 (the next cleanup deletes images not added to the project)",
                directory.display()
            );
        }
        output::warning(&format!(
            "{} is not empty; unreferenced images will be removed by cleanup",
            directory.display()
        ));
    }

    Manifest::new().save_with(directory, ctx.config.save_mode())?;
    output::success(&format!("Created project in {}", directory.display()));
    Ok(())
}
