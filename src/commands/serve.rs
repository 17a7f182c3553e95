use crate::LabelContext;
use crate::service::{self, FixedPicker, ProjectService};
use anyhow::{Context, Result};
use tokio::io::BufReader;

/// Answer JSON-line requests on stdin until it closes.
///
/// stdin carries requests, so `chooseDirectory` cannot prompt; it answers
/// with `core.default_project` (or cancels when unset).
///
/// # Errors
///
/// Returns an error if the runtime cannot start or the streams fail.
pub fn execute(ctx: &LabelContext) -> Result<()> {
    let picker = FixedPicker::new(ctx.config.core.default_project.clone());
    let service = ProjectService::new(picker, ctx.config.save_mode());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        service::serve(&service, stdin, stdout).await
    })
}
