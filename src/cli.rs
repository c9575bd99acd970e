// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::Backend;

/// Command-line arguments for `reqtmpl`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reqtmpl",
    version,
    about = "Resolve an HTTP request template and send it with curl, httpie or wget.",
    long_about = None
)]
pub struct CliArgs {
    /// Template file to resolve.
    ///
    /// When omitted, the template is read from stdin if it is piped.
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `reqtmpl.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Deadline in seconds for every executable and the backend call.
    ///
    /// Overrides `timeout_seconds` from the config file.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Backend to use when the template has no [Backend] section.
    #[arg(long, value_enum, value_name = "NAME")]
    pub backend: Option<Backend>,

    /// Print the backend command instead of running it.
    #[arg(short, long)]
    pub print_command: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `REQTMPL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
