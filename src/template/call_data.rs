// src/template/call_data.rs

use crate::exec::split_args;
use crate::types::Backend;

use super::line::{Fatal, TemplateLine};
use super::section::{SectionName, Sections};

/// Everything the backend command is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    pub url: String,
    pub method: Option<String>,
    pub headers: Vec<String>,
    /// Body lines joined with `\n`; `None` when there is no `[Body]`.
    pub body: Option<String>,
    pub backend: Backend,
    /// Extra backend arguments from `[BackendOptions]`.
    pub backend_options: Vec<String>,
}

impl CallData {
    /// Assemble call data from fully resolved sections.
    ///
    /// `default_backend` applies when the template has no `[Backend]`.
    pub fn from_sections(sections: &Sections, default_backend: Backend) -> Result<Self, Vec<Fatal>> {
        let mut fatals = Vec::new();
        let lines = move |name: SectionName| sections.get(&name).map(Vec::as_slice).unwrap_or_default();

        let host: String = lines(SectionName::Host).iter().map(|l| l.text.as_str()).collect();
        if host.trim().is_empty() {
            fatals.push(Fatal::general("Missing or empty [Host] section"));
        }

        let url = append_query(host.trim(), lines(SectionName::Query));
        let headers = lines(SectionName::Headers).iter().map(|l| l.text.clone()).collect();

        let method = single_line(lines(SectionName::Method), SectionName::Method, &mut fatals)
            .map(|l| l.text.clone());

        let backend = match single_line(lines(SectionName::Backend), SectionName::Backend, &mut fatals) {
            Some(line) => line.text.parse::<Backend>().unwrap_or_else(|msg| {
                fatals.push(Fatal::at(line, msg));
                default_backend
            }),
            None => default_backend,
        };

        let body = sections.get(&SectionName::Body).map(|body| {
            body.iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        });

        let mut backend_options = Vec::new();
        for line in lines(SectionName::BackendOptions) {
            match split_args(&line.text) {
                Ok(args) => backend_options.extend(args),
                Err(err) => fatals.push(Fatal::at(line, err.to_string())),
            }
        }

        if !fatals.is_empty() {
            return Err(fatals);
        }

        Ok(Self {
            url,
            method,
            headers,
            body,
            backend,
            backend_options,
        })
    }
}

fn single_line<'a>(
    lines: &'a [TemplateLine],
    section: SectionName,
    fatals: &mut Vec<Fatal>,
) -> Option<&'a TemplateLine> {
    if let Some(extra) = lines.get(1) {
        fatals.push(Fatal::at(extra, format!("Found several lines under {section}")));
    }
    lines.first()
}

fn append_query(host: &str, query: &[TemplateLine]) -> String {
    let mut url = host.to_string();
    for line in query {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&line.text);
    }
    url
}
