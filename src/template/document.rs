// src/template/document.rs

//! Splitting a template file into sections.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parse::{TokenKind, tokenize};

use super::line::{Fatal, TemplateFatals, TemplateLine};
use super::section::{SectionName, Sections};

static SECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Za-z]+)\]$").expect("section header regex"));

/// A template split into sections, with comments stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Vec<String>,
    pub sections: Sections,
}

impl Template {
    /// Parse template text.
    ///
    /// Every line is lexed with comments as the only recognised token kind,
    /// which drops comments and unescapes `` `# `` while leaving the
    /// `${`/`$(` escapes for the later resolution passes.
    pub fn parse(text: &str) -> Result<Self, TemplateFatals> {
        let source: Vec<String> = text.lines().map(str::to_string).collect();
        let mut sections = Sections::new();
        let mut fatals = Vec::new();
        let mut cursor = Cursor::Outside;

        for (index, raw) in source.iter().enumerate() {
            let stripped = strip_comment(raw);
            let trimmed = stripped.trim();

            if let Some(caps) = SECTION_HEADER_RE.captures(trimmed) {
                match caps[1].parse::<SectionName>() {
                    Ok(name) if sections.contains_key(&name) => {
                        fatals.push(Fatal::at_index(index, format!("Several {name} sections found")));
                        cursor = Cursor::Rejected;
                    }
                    Ok(name) => {
                        sections.insert(name, Vec::new());
                        cursor = Cursor::In(name);
                    }
                    Err(msg) => {
                        fatals.push(Fatal::at_index(index, msg));
                        cursor = Cursor::Rejected;
                    }
                }
                continue;
            }

            let name = match cursor {
                Cursor::In(name) => name,
                Cursor::Outside if !trimmed.is_empty() => {
                    fatals.push(Fatal::at_index(index, "Line outside of a section"));
                    continue;
                }
                // Content under a rejected header is covered by the header's fatal.
                Cursor::Outside | Cursor::Rejected => continue,
            };

            let lines = sections.entry(name).or_default();
            if name == SectionName::Body {
                lines.push(TemplateLine::new(stripped.trim_end(), index));
            } else if !trimmed.is_empty() {
                lines.push(TemplateLine::new(trimmed, index));
            }
        }

        if let Some(body) = sections.get_mut(&SectionName::Body) {
            trim_blank_edges(body);
        }

        if !fatals.is_empty() {
            return Err(TemplateFatals::new(fatals, source));
        }

        debug!(sections = sections.len(), lines = source.len(), "template parsed");
        Ok(Self { source, sections })
    }

    /// Attach this template's source to a list of fatals for display.
    pub fn fatals(&self, fatals: Vec<Fatal>) -> TemplateFatals {
        TemplateFatals::new(fatals, self.source.clone())
    }
}

fn strip_comment(raw: &str) -> String {
    tokenize(raw, TokenKind::Text)
        .tokens
        .into_iter()
        .filter(|t| t.kind == TokenKind::Text)
        .map(|t| t.content)
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Outside,
    In(SectionName),
    Rejected,
}

fn trim_blank_edges(lines: &mut Vec<TemplateLine>) {
    while lines.last().is_some_and(|l| l.text.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines
        .iter()
        .take_while(|l| l.text.trim().is_empty())
        .count();
    lines.drain(..leading);
}
