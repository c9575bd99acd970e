// src/call/invoke.rs

use std::io::Write;

use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::errors::{ReqtmplError, Result};
use crate::exec::{Bounded, Deadline};

use super::render::BackendCommand;

/// Write the request body to a temp file the backend can read.
///
/// The file is removed when the returned handle is dropped, so keep it alive
/// until the backend has exited.
pub fn write_body_file(body: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix("reqtmpl-body").tempfile()?;
    file.write_all(body.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Run the backend and return its stdout.
///
/// `deadline` should already be capped to the backend limit (see
/// [`Deadline::capped`]). A non-zero exit is reported with the captured
/// stderr and stdout and the backend's exit code.
pub async fn invoke_backend(
    cancel: &CancellationToken,
    deadline: Deadline,
    command: &BackendCommand,
) -> Result<String> {
    info!(command = %command, "invoking backend");

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args).kill_on_drop(true);

    let output = match deadline.run(cancel, cmd.output()).await {
        Bounded::Completed(Ok(output)) => output,
        Bounded::Completed(Err(err)) => {
            return Err(ReqtmplError::Backend {
                message: format!("Could not run backend command {command}: {err}"),
                exit_code: None,
            });
        }
        Bounded::TimedOut(budget) => {
            warn!(command = %command, "backend timed out");
            return Err(ReqtmplError::Backend {
                message: format!(
                    "Backend command {command} timed out after {} seconds",
                    budget.as_secs()
                ),
                exit_code: None,
            });
        }
        Bounded::Cancelled => {
            return Err(ReqtmplError::Backend {
                message: format!("Backend command {command} was cancelled"),
                exit_code: None,
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReqtmplError::Backend {
            message: format!(
                "Error: {}, running backend command: {command}.\nError output: {} {}",
                output.status,
                stderr.trim(),
                stdout.trim()
            ),
            exit_code: output.status.code(),
        });
    }

    Ok(stdout)
}
