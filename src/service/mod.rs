//! Request/response boundary for UI collaborators.
//!
//! The handler is stateless: every request names the directory it works on
//! and nothing is remembered between requests. Front-ends talk to it either
//! in-process ([`ProjectService::handle`]) or as JSON lines over a byte
//! stream ([`serve`]).
//!
//! Blocking filesystem work is moved to the runtime's blocking pool, except
//! for `saveManifestSync`, which runs on the caller's task and completes
//! before the response is produced. That variant exists for teardown paths
//! where the process may exit right after the request returns.
//!
//! Requests on one stream are handled strictly one at a time, so a
//! `cleanupProject` never races a `saveManifest` issued through the same
//! connection.

/// Directory choice abstraction.
pub mod picker;

/// Request and response wire types.
pub mod protocol;

pub use picker::{DirectoryPicker, FixedPicker, PromptPicker};
pub use protocol::{Request, Response};

use crate::enumerate;
use crate::export;
use crate::manifest::{Manifest, SaveMode, save_async};
use crate::reconcile::{self, CleanupOptions};
use crate::scanner;
use crate::transfer;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Dispatches [`Request`]s to the project core.
#[derive(Debug, Clone)]
pub struct ProjectService<P> {
    /// Answers `chooseDirectory`
    picker: P,
    /// How manifests are written
    save_mode: SaveMode,
}

impl<P: DirectoryPicker> ProjectService<P> {
    /// Create a service using `picker` for directory choices.
    #[must_use]
    pub const fn new(picker: P, save_mode: SaveMode) -> Self {
        Self { picker, save_mode }
    }

    /// Handle one request on the async runtime.
    pub async fn handle(&self, request: Request) -> Response {
        debug!(op = request.op(), "handling request");
        match request {
            Request::ChooseDirectory | Request::SaveManifestSync { .. } => {
                self.handle_blocking(request)
            }
            Request::SaveManifest {
                manifest,
                directory,
            } => unit(save_async(manifest, directory, self.save_mode).await),
            other => {
                let save_mode = self.save_mode;
                let op = other.op();
                tokio::task::spawn_blocking(move || execute(other, save_mode))
                    .await
                    .unwrap_or_else(|e| {
                        warn!(op, "request task failed: {e}");
                        Response::message(format!("{op} failed: {e}"))
                    })
            }
        }
    }

    /// Handle one request on the calling thread.
    pub fn handle_blocking(&self, request: Request) -> Response {
        match request {
            Request::ChooseDirectory => match self.picker.choose_directory() {
                Ok(directory) => Response {
                    directory,
                    ..Response::ok()
                },
                Err(e) => Response::message(format!("{e:#}")),
            },
            other => execute(other, self.save_mode),
        }
    }
}

/// Run a request that needs no picker.
fn execute(request: Request, save_mode: SaveMode) -> Response {
    match request {
        Request::ChooseDirectory => {
            Response::message("chooseDirectory requires an interactive front-end")
        }
        Request::LoadManifest { directory } => match Manifest::load(&directory) {
            Ok(manifest) => Response {
                data: Some(manifest),
                ..Response::ok()
            },
            Err(e) => Response::failure(&e),
        },
        Request::SaveManifest {
            manifest,
            directory,
        }
        | Request::SaveManifestSync {
            manifest,
            directory,
        } => unit(manifest.save_with(&directory, save_mode)),
        Request::CopyFile {
            source_path,
            dest_path,
        } => unit(transfer::copy_into(&source_path, &dest_path).map(drop)),
        Request::WriteFile { bytes, dest_path } => {
            unit(transfer::write_buffer(&bytes, &dest_path))
        }
        Request::DeleteFile { path } => unit(transfer::delete(&path)),
        Request::ListProjectImages { directory } => {
            match enumerate::list_project_images(&directory) {
                Ok(files) => Response {
                    files: Some(files),
                    ..Response::ok()
                },
                Err(e) => Response::failure(&e),
            }
        }
        Request::IsDirectoryEmpty { directory } => {
            match scanner::is_directory_empty(&directory) {
                Ok(empty) => Response {
                    empty: Some(empty),
                    ..Response::ok()
                },
                Err(e) => Response {
                    empty: Some(false),
                    ..Response::failure(&e)
                },
            }
        }
        Request::CleanupProject { directory, dry_run } => {
            let options = CleanupOptions { dry_run, save_mode };
            match reconcile::cleanup_with(&directory, &options) {
                Ok(report) => Response {
                    report: Some(report),
                    ..Response::ok()
                },
                Err(e) => Response::failure(&e),
            }
        }
        Request::ExportAll { data, directory } => match export::export_all(&data, &directory) {
            Ok(path) => Response {
                path: Some(path),
                ..Response::ok()
            },
            Err(e) => Response::failure(&e),
        },
    }
}

fn unit(result: crate::ProjectResult<()>) -> Response {
    match result {
        Ok(()) => Response::ok(),
        Err(e) => Response::failure(&e),
    }
}

/// Serve JSON-line requests from `reader`, writing one JSON-line response
/// per request to `writer`, until end of input.
///
/// Blank lines are ignored. A line that is not a valid request produces an
/// error response rather than ending the session.
///
/// # Errors
///
/// Returns an error only if reading or writing the stream fails.
pub async fn serve<P, R, W>(service: &ProjectService<P>, reader: R, mut writer: W) -> Result<()>
where
    P: DirectoryPicker,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => service.handle(request).await,
            Err(e) => Response::message(format!("invalid request: {e}")),
        };

        let mut out = serde_json::to_vec(&response).context("Failed to encode response")?;
        out.push(b'\n');
        writer
            .write_all(&out)
            .await
            .context("Failed to write response")?;
        writer.flush().await.context("Failed to flush response")?;
        handled += 1;
    }

    debug!(handled, "request stream closed");
    Ok(())
}
