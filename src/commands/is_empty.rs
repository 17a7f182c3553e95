use crate::{LabelContext, scanner};
use anyhow::{Context, Result};
use std::path::Path;

/// Print `true` or `false` depending on whether `directory` is usable as a
/// fresh project location.
///
/// An unreadable directory prints `false` and then reports the error.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn execute(_ctx: &LabelContext, directory: &Path) -> Result<()> {
    match scanner::is_directory_empty(directory) {
        Ok(empty) => {
            println!("{empty}");
            Ok(())
        }
        Err(e) => {
            println!("false");
            Err(e).with_context(|| format!("Cannot read {}", directory.display()))
        }
    }
}
