use crate::service::{DirectoryPicker, PromptPicker};
use crate::{LabelContext, output};
use anyhow::Result;

/// Prompt for a project directory and print it on stdout.
///
/// # Errors
///
/// Returns an error if the prompt fails, the answer is not a directory, or
/// the configuration cannot be saved.
pub fn execute(ctx: &mut LabelContext, set_default: bool) -> Result<()> {
    if ctx.non_interactive {
        anyhow::bail!("Cannot prompt for a directory in non-interactive mode");
    }

    let Some(directory) = PromptPicker.choose_directory()? else {
        output::info("Cancelled");
        return Ok(());
    };

    if set_default {
        ctx.config.core.default_project = Some(directory.clone());
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("core.default_project = {}", directory.display()));
    }

    println!("{}", directory.display());
    Ok(())
}
