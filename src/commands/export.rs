use crate::{LabelContext, export, output};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Write `exported_data.json` from a JSON document (`-` reads stdin).
///
/// The document is validated as JSON but otherwise passed through.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the export
/// cannot be written.
pub fn execute(_ctx: &LabelContext, directory: &Path, data: &Path) -> Result<()> {
    let raw = if data == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read export data from stdin")?;
        buf
    } else {
        std::fs::read_to_string(data)
            .with_context(|| format!("Failed to read {}", data.display()))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Export data is not valid JSON")?;
    let path = export::export_all(&value, directory)?;

    output::success(&format!("Exported to {}", path.display()));
    Ok(())
}
