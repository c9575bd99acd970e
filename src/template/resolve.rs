// src/template/resolve.rs

//! Resolution passes: variables first, then executables.

use std::collections::{BTreeMap, BTreeSet};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::exec::{Deadline, extract_executables, run_executables, substitute_executables};

use super::line::Fatal;
use super::section::{SectionName, Sections};
use super::vars::{Variables, env_var_syntax_fatals, expand_env_vars, parse_default_vars};

/// Resolve every reference in `sections`, in place.
///
/// Order: `${...}` expansion on all lines, then extraction of all `$(...)`
/// expressions, then one concurrent run of every executable, then
/// substitution. Lexical fatals of both kinds are gathered from every line
/// and reported together before any process is spawned; execution fatals
/// are reported together once every process is done.
pub async fn resolve_sections(
    sections: &mut Sections,
    vars: &Variables,
    cancel: &CancellationToken,
    deadline: Deadline,
) -> Result<(), Vec<Fatal>> {
    let mut fatals = expand_env_vars(sections, vars);
    let unexpanded = line_indices(&fatals);

    let extracted = match extract_executables(sections) {
        Ok(extracted) => extracted,
        Err(exec_fatals) => {
            fatals.extend(without_lines(exec_fatals, &unexpanded));
            Vec::new()
        }
    };
    if !fatals.is_empty() {
        return Err(in_line_order(fatals));
    }

    let outputs = if extracted.is_empty() {
        debug!("no executables to run");
        Vec::new()
    } else {
        let requests: Vec<_> = extracted.iter().map(|e| e.request.clone()).collect();
        run_executables(cancel, deadline, &requests).await
    };

    substitute_executables(sections, &extracted, outputs)
}

/// Resolve a whole template's sections.
///
/// `[DefaultVars]` is resolved first in its own pass (seeing only `vars`),
/// and its `NAME=value` pairs then back the lookup for every other section.
/// When that first pass fails, the other sections are still checked for
/// lexical fatals so everything wrong with the file is reported at once.
pub async fn resolve_template(
    sections: &Sections,
    vars: Variables,
    cancel: &CancellationToken,
    deadline: Deadline,
) -> Result<Sections, Vec<Fatal>> {
    let mut sections = sections.clone();

    let mut defaults_only = Sections::new();
    if let Some(lines) = sections.remove(&SectionName::DefaultVars) {
        defaults_only.insert(SectionName::DefaultVars, lines);
    }

    let defaults = match resolve_defaults(&mut defaults_only, &vars, cancel, deadline).await {
        Ok(defaults) => defaults,
        Err(mut fatals) => {
            fatals.extend(lexical_fatals(&sections));
            return Err(in_line_order(fatals));
        }
    };
    info!(count = defaults.len(), "default variables resolved");

    let vars = vars.with_defaults(defaults);
    resolve_sections(&mut sections, &vars, cancel, deadline).await?;

    Ok(sections)
}

async fn resolve_defaults(
    defaults_only: &mut Sections,
    vars: &Variables,
    cancel: &CancellationToken,
    deadline: Deadline,
) -> Result<BTreeMap<String, String>, Vec<Fatal>> {
    resolve_sections(defaults_only, vars, cancel, deadline).await?;
    parse_default_vars(defaults_only)
}

/// Syntax-only fatals of unexpanded sections: nothing is looked up or run.
fn lexical_fatals(sections: &Sections) -> Vec<Fatal> {
    let mut fatals = env_var_syntax_fatals(sections);
    let broken = line_indices(&fatals);

    if let Err(exec_fatals) = extract_executables(sections) {
        fatals.extend(without_lines(exec_fatals, &broken));
    }
    fatals
}

fn line_indices(fatals: &[Fatal]) -> BTreeSet<usize> {
    fatals.iter().filter_map(|f| f.source_line_index).collect()
}

/// Drop fatals on lines that already have one from an earlier pass.
fn without_lines(fatals: Vec<Fatal>, lines: &BTreeSet<usize>) -> impl Iterator<Item = Fatal> {
    fatals
        .into_iter()
        .filter(move |f| f.source_line_index.is_none_or(|i| !lines.contains(&i)))
}

fn in_line_order(mut fatals: Vec<Fatal>) -> Vec<Fatal> {
    fatals.sort_by_key(|f| f.source_line_index);
    fatals
}
