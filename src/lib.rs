// src/lib.rs

pub mod call;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod parse;
pub mod template;
pub mod types;

use std::io::{IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::call::{invoke_backend, render_command, write_body_file};
use crate::cli::CliArgs;
use crate::config::loader::load_optional;
use crate::config::validate::ensure_positive;
use crate::errors::{ReqtmplError, Result};
use crate::exec::Deadline;
use crate::template::{CallData, Template, Variables, resolve_template};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, then CLI overrides)
/// - template parsing and resolution
/// - backend command rendering
/// - backend invocation (or printing, with `--print-command`)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_optional(args.config.as_deref().map(Path::new))?;

    let timeout_seconds = match args.timeout {
        Some(secs) => {
            ensure_positive("timeout_seconds", secs)?;
            Some(secs)
        }
        None => cfg.config.timeout_seconds,
    };
    let default_backend = args.backend.unwrap_or(cfg.config.default_backend);

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let text = read_template(args.template.as_deref(), stdin.lock(), interactive)?;
    let template = Template::parse(&text).map_err(ReqtmplError::Template)?;

    // Ctrl-C → cancel every running process.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            cancel.cancel();
        });
    }

    let deadline = Deadline::from_timeout_seconds(timeout_seconds);
    info!(?timeout_seconds, "resolving template");

    let resolved = resolve_template(
        &template.sections,
        Variables::from_process_env(),
        &cancel,
        deadline,
    )
    .await
    .map_err(|fatals| ReqtmplError::Template(template.fatals(fatals)))?;

    let call = CallData::from_sections(&resolved, default_backend)
        .map_err(|fatals| ReqtmplError::Template(template.fatals(fatals)))?;
    debug!(url = %call.url, backend = %call.backend, "call data assembled");

    let body_file = call.body.as_deref().map(write_body_file).transpose()?;
    let command = render_command(&call, body_file.as_ref().map(|f| f.path()))?;

    if args.print_command {
        // The printed command refers to the body file, so it has to outlive us.
        if let Some(file) = body_file {
            file.keep().map_err(|e| e.error)?;
        }
        println!("{command}");
        return Ok(());
    }

    let backend_deadline = deadline.capped(Duration::from_secs(cfg.config.backend_timeout_seconds));
    let stdout = invoke_backend(&cancel, backend_deadline, &command).await?;
    print!("{stdout}");

    Ok(())
}

/// Read the template from `path`, or from `stdin` when no path is given and
/// stdin is not a terminal.
pub fn read_template(
    path: Option<&Path>,
    mut stdin: impl Read,
    stdin_is_terminal: bool,
) -> Result<String> {
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        return Ok(text);
    }

    if stdin_is_terminal {
        return Err(ReqtmplError::Usage(
            "Missing template file\nUsage: reqtmpl <TEMPLATE> or pipe a template into stdin"
                .to_string(),
        ));
    }

    debug!("reading template from stdin");
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read template from stdin")?;
    Ok(text)
}
