// src/exec/mod.rs

//! Executable expressions: finding them, running them, and writing their
//! output back into the template.
//!
//! - [`extract`] locates `$(...)` expressions in resolved section text and
//!   turns each into an [`ExecutableAndArgs`].
//! - [`args`] splits command lines into arguments, honouring quotes.
//! - [`runner`] runs all requests concurrently using
//!   `tokio::process::Command`, one task per request.
//! - [`deadline`] bounds every process of a run by one shared deadline and
//!   the run's cancellation token.
//! - [`substitute`] splices outputs back into the lines.

pub mod args;
pub mod deadline;
pub mod extract;
pub mod runner;
pub mod substitute;

pub use args::{ArgsError, split_args, split_command_line, unsplit_on_separator};
pub use deadline::{Bounded, Deadline};
pub use extract::{ExecutableAndArgs, ExtractedExecutable, extract_executables};
pub use runner::{ExecutableOutput, run_executables};
pub use substitute::substitute_executables;
