// src/call/mod.rs

//! Handing resolved call data to an HTTP client binary.
//!
//! [`render`] turns call data into a [`BackendCommand`]; [`invoke`] runs it.

pub mod invoke;
pub mod render;

pub use invoke::{invoke_backend, write_body_file};
pub use render::{BackendCommand, RenderContext, backend_template, render_command, render_template};
