// src/exec/runner.rs

//! Concurrent execution of executable expressions.

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::deadline::{Bounded, Deadline};
use super::extract::ExecutableAndArgs;

/// Result of one executable: its trimmed stdout, or why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableOutput {
    Output(String),
    Fatal(String),
}

impl ExecutableOutput {
    pub fn output(&self) -> Option<&str> {
        match self {
            ExecutableOutput::Output(out) => Some(out),
            ExecutableOutput::Fatal(_) => None,
        }
    }

    pub fn fatal(&self) -> Option<&str> {
        match self {
            ExecutableOutput::Output(_) => None,
            ExecutableOutput::Fatal(msg) => Some(msg),
        }
    }
}

/// Run every request in its own Tokio task and wait for all of them.
///
/// `results[i]` always belongs to `requests[i]`, whatever order the
/// processes finish in. There is no early return: a failing request never
/// stops the others.
pub async fn run_executables(
    cancel: &CancellationToken,
    deadline: Deadline,
    requests: &[ExecutableAndArgs],
) -> Vec<ExecutableOutput> {
    info!(
        count = requests.len(),
        timeout_secs = deadline.budget().map(|b| b.as_secs()),
        "running executables"
    );

    let handles: Vec<_> = requests
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, request)| {
            let cancel = cancel.clone();
            tokio::spawn(async move { run_executable(index, request, deadline, cancel).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let output = match handle.await {
            Ok(output) => output,
            Err(err) => ExecutableOutput::Fatal(format!("Executable task failed: {err}")),
        };
        results.push(output);
    }
    results
}

async fn run_executable(
    index: usize,
    request: ExecutableAndArgs,
    deadline: Deadline,
    cancel: CancellationToken,
) -> ExecutableOutput {
    debug!(index, command = %request, "starting executable");

    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args).kill_on_drop(true);

    let result = match deadline.run(&cancel, cmd.output()).await {
        Bounded::Completed(result) => result,
        Bounded::TimedOut(budget) => {
            warn!(index, command = %request, "executable timed out");
            return ExecutableOutput::Fatal(format!(
                "Executable {request} timed out after {} seconds",
                budget.as_secs()
            ));
        }
        Bounded::Cancelled => {
            return ExecutableOutput::Fatal(format!("Executable {request} was cancelled"));
        }
    };

    let output = match result {
        Ok(output) => output,
        Err(err) => return ExecutableOutput::Fatal(format!("Executable {request} error: {err}")),
    };

    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let captured = format!("{} {}", stdout.trim(), stderr.trim());
        let captured = captured.trim();
        let detail = if captured.is_empty() {
            String::new()
        } else {
            format!("\n{captured}")
        };

        debug!(index, command = %request, status = %output.status, "executable failed");
        return ExecutableOutput::Fatal(format!(
            "Executable {request} error: {}{detail}",
            output.status
        ));
    }

    let stdout = stdout.trim();
    if stdout.is_empty() {
        return ExecutableOutput::Fatal(format!(
            "Executable {request}\nCommand produced no stdout output"
        ));
    }

    debug!(index, command = %request, bytes = stdout.len(), "executable finished");
    ExecutableOutput::Output(stdout.to_string())
}
