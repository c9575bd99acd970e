// src/template/mod.rs

//! Template documents and their resolution.
//!
//! - [`document`] splits a template file into named sections.
//! - [`vars`] resolves `${NAME}` references.
//! - [`resolve`] runs the variable and executable passes over sections.
//! - [`call_data`] turns resolved sections into the data a backend command
//!   is rendered from.

pub mod call_data;
pub mod document;
pub mod line;
pub mod resolve;
pub mod section;
pub mod vars;

pub use call_data::CallData;
pub use document::Template;
pub use line::{Fatal, TemplateFatals, TemplateLine};
pub use resolve::{resolve_sections, resolve_template};
pub use section::{SectionName, Sections};
pub use vars::{Variables, env_var_syntax_fatals, expand_env_vars, parse_default_vars};
