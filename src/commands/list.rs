use crate::enumerate;
use crate::utils::{format_size, format_time};
use crate::{LabelContext, output};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Print the images present both in the manifest and on disk.
///
/// # Errors
///
/// Returns an error if the manifest is corrupt or JSON output fails.
pub fn execute(_ctx: &LabelContext, directory: &Path, json: bool) -> Result<()> {
    let images = enumerate::list_project_images(directory)?;

    if json {
        let text = serde_json::to_string_pretty(&images).context("Failed to encode image list")?;
        println!("{text}");
        return Ok(());
    }

    if images.is_empty() {
        output::info("No images in project");
        return Ok(());
    }

    let width = images.iter().map(|img| img.name.len()).max().unwrap_or(0);
    for image in &images {
        println!(
            "{:<width$}  {:>10}  {}",
            image.name,
            format_size(image.size),
            format_time(image.created).dimmed(),
        );
    }

    let total: u64 = images.iter().map(|img| img.size).sum();
    output::info(&format!("{} image(s), {}", images.len(), format_size(total)));
    Ok(())
}
