use crate::manifest::Manifest;
use crate::reconcile::ReconcilePlan;
use crate::scanner::DirectoryListing;
use crate::{LabelContext, output};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Show how the manifest and the directory differ, without changing anything.
///
/// # Errors
///
/// Returns an error if the manifest is corrupt or the directory cannot be listed.
pub fn execute(_ctx: &LabelContext, directory: &Path) -> Result<()> {
    let Some(manifest) = Manifest::load_optional(directory)? else {
        output::info(&format!("No project in {}", directory.display()));
        return Ok(());
    };

    let listing = DirectoryListing::scan(directory)
        .with_context(|| format!("Failed to list {}", directory.display()))?;
    let plan = ReconcilePlan::compute(&manifest, &listing);

    println!("Project: {}", directory.display());
    println!(
        "Images:  {} in manifest, {} image file(s) on disk",
        manifest.images.len(),
        listing.image_names.len()
    );

    if plan.is_clean() {
        println!("\n{}", "Manifest and directory are in sync".green());
        return Ok(());
    }

    print_section("Missing files (entries will be pruned):", &plan.dangling, "missing:");
    print_section("Orphan images (files will be deleted):", &plan.orphans, "orphan:");

    println!();
    output::info("Run 'lproj cleanup' to reconcile, or 'lproj cleanup -n' to preview");
    Ok(())
}

fn print_section(title: &str, names: &[String], label: &str) {
    if names.is_empty() {
        return;
    }
    println!("\n{}", title.yellow().bold());
    for name in names {
        println!("  {} {}", label.red(), name);
    }
}
