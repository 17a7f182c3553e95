use crate::reconcile::{self, CleanupOptions};
use crate::{LabelContext, output};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Reconcile the project: delete orphan images, prune dangling entries.
///
/// # Errors
///
/// Returns an error if the manifest is corrupt, the directory cannot be
/// listed, an orphan cannot be deleted, or the manifest cannot be saved.
pub fn execute(ctx: &LabelContext, directory: &Path, dry_run: bool) -> Result<()> {
    let options = CleanupOptions {
        dry_run,
        save_mode: ctx.config.save_mode(),
    };
    let report = reconcile::cleanup_with(directory, &options)
        .with_context(|| format!("Cleanup of {} failed", directory.display()))?;

    if !report.changed() {
        output::info("Already clean - manifest and directory agree");
        return Ok(());
    }

    if dry_run {
        println!("\n{}", "Would make the following changes:".yellow().bold());
    }

    let (delete_verb, prune_verb) = if dry_run {
        ("would delete:", "would prune:")
    } else {
        ("deleted:", "pruned:")
    };
    for name in &report.deleted {
        println!("  {} {}", delete_verb.red(), name);
    }
    for name in &report.pruned {
        println!("  {} {}", prune_verb.yellow(), name);
    }

    println!();
    if dry_run {
        output::info(&format!(
            "{} orphan file(s) would be deleted, {} entr(ies) pruned",
            report.deleted.len(),
            report.pruned.len()
        ));
        output::info("Run 'lproj cleanup' to apply");
    } else {
        output::success(&format!(
            "Deleted {} orphan file(s), pruned {} entr(ies)",
            report.deleted.len(),
            report.pruned.len()
        ));
    }
    Ok(())
}
