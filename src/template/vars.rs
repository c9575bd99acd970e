// src/template/vars.rs

//! `${NAME}` resolution.

use std::collections::BTreeMap;

use tracing::debug;

use crate::parse::{TokenKind, tokenize_env_vars};

use super::line::{Fatal, TemplateLine};
use super::section::{SectionName, Sections};

/// Where `${NAME}` values come from.
///
/// Lookup order: explicit overrides, the process environment (when enabled),
/// then `[DefaultVars]`.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    overrides: BTreeMap<String, String>,
    defaults: BTreeMap<String, String>,
    process_env: bool,
}

impl Variables {
    /// Variables backed by the process environment.
    pub fn from_process_env() -> Self {
        Self {
            process_env: true,
            ..Self::default()
        }
    }

    /// Variables that never consult the process environment.
    pub fn isolated() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    pub fn with_defaults(mut self, defaults: BTreeMap<String, String>) -> Self {
        self.defaults.extend(defaults);
        self
    }

    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        if self.process_env {
            if let Ok(value) = std::env::var(name) {
                return Some(value);
            }
        }
        self.defaults.get(name).cloned()
    }
}

/// Replace every `${NAME}` in every section line, in place.
///
/// Returns all fatals found; lines with fatals are left untouched.
pub fn expand_env_vars(sections: &mut Sections, vars: &Variables) -> Vec<Fatal> {
    let mut fatals = Vec::new();

    for line in sections.values_mut().flatten() {
        match expand_line(line, vars) {
            Ok(text) => line.text = text,
            Err(mut line_fatals) => fatals.append(&mut line_fatals),
        }
    }

    fatals
}

fn expand_line(line: &TemplateLine, vars: &Variables) -> Result<String, Vec<Fatal>> {
    let scan = tokenize_env_vars(&line.text).map_err(|e| vec![Fatal::at(line, e.to_string())])?;

    let mut fatals = Vec::new();
    let mut out = String::with_capacity(line.text.len());

    for token in scan.tokens {
        match token.kind {
            TokenKind::EnvVar => {
                let name = token.content.trim();
                if name.is_empty() {
                    fatals.push(Fatal::at(line, format!("Empty variable: {}", token.raw)));
                    continue;
                }
                match vars.get(name) {
                    Some(value) => {
                        debug!(variable = %name, line = line.source_line_index, "substituted variable");
                        out.push_str(&value);
                    }
                    None => fatals.push(Fatal::at(line, format!("Cannot find value for variable {name}"))),
                }
            }
            _ => out.push_str(&token.content),
        }
    }

    if fatals.is_empty() { Ok(out) } else { Err(fatals) }
}

/// Report `${...}` syntax problems without looking any value up.
///
/// Used to list the lexical fatals of sections that cannot be expanded yet
/// because their variable sources failed to resolve.
pub fn env_var_syntax_fatals(sections: &Sections) -> Vec<Fatal> {
    let mut fatals = Vec::new();

    for line in sections.values().flatten() {
        match tokenize_env_vars(&line.text) {
            Ok(scan) => fatals.extend(
                scan.tokens
                    .iter()
                    .filter(|t| t.kind == TokenKind::EnvVar && t.content.trim().is_empty())
                    .map(|t| Fatal::at(line, format!("Empty variable: {}", t.raw))),
            ),
            Err(err) => fatals.push(Fatal::at(line, err.to_string())),
        }
    }

    fatals
}

/// Turn resolved `[DefaultVars]` lines (`NAME=value`) into a map.
///
/// Later definitions of the same name win.
pub fn parse_default_vars(sections: &Sections) -> Result<BTreeMap<String, String>, Vec<Fatal>> {
    let mut defaults = BTreeMap::new();
    let mut fatals = Vec::new();

    for line in sections.get(&SectionName::DefaultVars).into_iter().flatten() {
        match line.text.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                defaults.insert(name.trim().to_string(), value.trim().to_string());
            }
            Some(_) => fatals.push(Fatal::at(line, "Empty variable name in [DefaultVars]")),
            None => fatals.push(Fatal::at(line, "Expected NAME=value in [DefaultVars]")),
        }
    }

    if fatals.is_empty() { Ok(defaults) } else { Err(fatals) }
}
