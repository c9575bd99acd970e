// src/call/render.rs

//! Rendering the backend command line.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::errors::{ReqtmplError, Result};
use crate::exec::split_command_line;
use crate::template::CallData;
use crate::types::Backend;

const CURL_TEMPLATE: &str = concat!(
    "curl",
    "{% if method %} -X {{ method }}{% endif %}",
    r#"{% for header in headers %} -H "{{ header }}"{% endfor %}"#,
    r#"{% if body_file %} --data-binary "@{{ body_file }}"{% endif %}"#,
    r#" "{{ url }}""#,
);

const HTTPIE_TEMPLATE: &str = concat!(
    "http --ignore-stdin",
    "{% if method %} {{ method }}{% endif %}",
    r#" "{{ url }}""#,
    r#"{% for header in headers %} "{{ header }}"{% endfor %}"#,
    r#"{% if body_file %} "@{{ body_file }}"{% endif %}"#,
);

const WGET_TEMPLATE: &str = concat!(
    "wget -q -O -",
    "{% if method %} --method={{ method }}{% endif %}",
    r#"{% for header in headers %} --header "{{ header }}"{% endfor %}"#,
    r#"{% if body_file %} --body-file "{{ body_file }}"{% endif %}"#,
    r#" "{{ url }}""#,
);

/// Command-line template for a backend.
pub fn backend_template(backend: Backend) -> &'static str {
    match backend {
        Backend::Curl => CURL_TEMPLATE,
        Backend::Httpie => HTTPIE_TEMPLATE,
        Backend::Wget => WGET_TEMPLATE,
    }
}

/// Values a backend template can refer to.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub url: &'a str,
    pub method: Option<&'a str>,
    pub headers: &'a [String],
    pub body_file: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(call: &'a CallData, body_file: Option<&Path>) -> Self {
        Self {
            url: &call.url,
            method: call.method.as_deref(),
            headers: &call.headers,
            body_file: body_file.map(|p| p.display().to_string()),
        }
    }
}

/// A program plus its argument list, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for BackendCommand {
    /// Shell-like rendering: arguments that would split are single-quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Render the command for `call`'s backend, appending `[BackendOptions]`.
pub fn render_command(call: &CallData, body_file: Option<&Path>) -> Result<BackendCommand> {
    let context = RenderContext::new(call, body_file);
    let mut command = render_template(backend_template(call.backend), &context)?;
    command.args.extend(call.backend_options.iter().cloned());
    debug!(backend = %call.backend, command = %command, "rendered backend command");
    Ok(command)
}

/// Render `template` and split the result into program and arguments.
///
/// Fails when the rendered text is empty or its first word is.
pub fn render_template(template: &str, context: &RenderContext<'_>) -> Result<BackendCommand> {
    let context = Context::from_serialize(context)
        .map_err(|e| ReqtmplError::Render(format!("Could not build template context: {e}")))?;
    let rendered = Tera::one_off(template, &context, false)
        .map_err(|e| ReqtmplError::Render(format!("Could not execute backend template: {e}")))?;

    let rendered = rendered.trim();
    if rendered.is_empty() {
        return Err(ReqtmplError::Render("Empty backend template result".to_string()));
    }

    let mut parts = split_command_line(rendered).into_iter();
    let program = parts.next().unwrap_or_default();
    if program.trim().is_empty() {
        return Err(ReqtmplError::Render(format!(
            "Empty backend command. Template output: {rendered}"
        )));
    }

    Ok(BackendCommand {
        program,
        args: parts.collect(),
    })
}
