// src/exec/substitute.rs

use std::collections::BTreeMap;
use std::ops::Range;

use crate::parse::Grammar;
use crate::parse::escape::unescape_text;
use crate::template::{Fatal, SectionName, Sections};

use super::extract::ExtractedExecutable;
use super::runner::ExecutableOutput;

/// Write executable outputs back into their lines.
///
/// Every failed executable becomes a fatal on its line; if there is any,
/// nothing is rewritten. Otherwise each expression is replaced by its
/// output and the literal text around it gets `` `$( `` unescaped. Lines
/// without expressions are only unescaped.
pub fn substitute_executables(
    sections: &mut Sections,
    extracted: &[ExtractedExecutable],
    outputs: Vec<ExecutableOutput>,
) -> Result<(), Vec<Fatal>> {
    let mut fatals = Vec::new();
    let mut replacements: BTreeMap<(SectionName, usize), Vec<(Range<usize>, String)>> =
        BTreeMap::new();

    for (exe, output) in extracted.iter().zip(outputs) {
        match output {
            ExecutableOutput::Output(value) => replacements
                .entry((exe.section, exe.line))
                .or_default()
                .push((exe.span.clone(), value)),
            ExecutableOutput::Fatal(msg) => fatals.push(Fatal::at_index(exe.source_line_index, msg)),
        }
    }

    if !fatals.is_empty() {
        return Err(fatals);
    }

    for section in SectionName::EXECUTABLE_SECTIONS {
        let Some(lines) = sections.get_mut(&section) else {
            continue;
        };
        for (idx, line) in lines.iter_mut().enumerate() {
            let spliced = match replacements.get(&(section, idx)) {
                Some(values) => splice(&line.text, values),
                None => splice(&line.text, &[]),
            };
            line.text = spliced;
        }
    }

    Ok(())
}

fn splice(text: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (span, value) in replacements {
        out.push_str(&unescape_text(&text[cursor..span.start], Grammar::EXECUTABLES, true));
        out.push_str(value);
        cursor = span.end;
    }

    out.push_str(&unescape_text(&text[cursor..], Grammar::EXECUTABLES, false));
    out
}
