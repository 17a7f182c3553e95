use crate::manifest::{ImageEntry, Manifest};
use crate::scanner::is_image_name;
use crate::utils::paths::file_name_str;
use crate::{LabelContext, output, transfer};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Copy image files into the project and append them to the manifest.
///
/// Files are copied first and the manifest is saved once at the end, so an
/// interrupted run leaves orphans (removed by cleanup) rather than dangling
/// entries. A failing file is reported and skipped; the others still go in.
///
/// # Errors
///
/// Returns an error if the directory has no project, the manifest cannot be
/// loaded or saved, or every file failed.
pub fn execute(
    ctx: &LabelContext,
    directory: &Path,
    files: &[PathBuf],
    force: bool,
) -> Result<()> {
    let mut manifest = Manifest::load_optional(directory)?.with_context(|| {
        format!(
            "No project in {} (run 'lproj new' first)",
            directory.display()
        )
    })?;

    let mut added = 0usize;
    let mut replaced = 0usize;
    let mut failed = 0usize;

    for source in files {
        let Some(name) = file_name_str(source) else {
            output::warning(&format!("Skipping {}: no usable file name", source.display()));
            failed += 1;
            continue;
        };

        if !is_image_name(name) {
            output::warning(&format!("Skipping {name}: not a recognized image type"));
            continue;
        }

        let exists = manifest.contains(name);
        if exists && !force {
            output::warning(&format!(
                "Skipping {name}: already in project (use --force to overwrite)"
            ));
            continue;
        }

        let destination = directory.join(name);
        if let Err(e) = transfer::copy_into(source, &destination) {
            output::error(&format!("Failed to add {name}: {e}"));
            failed += 1;
            continue;
        }

        if exists {
            output::action("replaced", name);
            replaced += 1;
        } else {
            manifest.push_image(ImageEntry::new(name));
            output::action("added", name);
            added += 1;
        }
    }

    if added > 0 {
        manifest.save_with(directory, ctx.config.save_mode())?;
    }

    if added + replaced > 0 {
        output::success(&format!("Added {added} image(s), replaced {replaced}"));
    } else if failed == 0 {
        output::info("No images added");
    }

    if failed > 0 {
        if added + replaced == 0 {
            anyhow::bail!("Failed to add {failed} file(s)");
        }
        output::warning(&format!("Failed to add {failed} file(s)"));
    }
    Ok(())
}
