// src/exec/extract.rs

//! Finding `$(...)` expressions in resolved section text.

use std::fmt;
use std::ops::Range;

use tracing::debug;

use crate::parse::{Token, TokenKind, tokenize_executables};
use crate::template::{Fatal, SectionName, Sections, TemplateLine};

use super::args::split_args;

/// One program invocation requested by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableAndArgs {
    pub program: String,
    pub args: Vec<String>,
}

impl ExecutableAndArgs {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for ExecutableAndArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// An executable expression and where to put its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedExecutable {
    pub section: SectionName,
    /// Index of the line within its section.
    pub line: usize,
    pub source_line_index: usize,
    /// Byte range of the whole `$(...)` expression in the line text.
    pub span: Range<usize>,
    pub request: ExecutableAndArgs,
}

/// Collect every executable expression of the executable sections.
///
/// Expressions are found with the executable lexer, so escaping and quoting
/// follow exactly the same rules as everywhere else. Scanning does not stop
/// at the first problem: unterminated, empty or unsplittable expressions are
/// all reported, each against its own line.
pub fn extract_executables(sections: &Sections) -> Result<Vec<ExtractedExecutable>, Vec<Fatal>> {
    let mut extracted = Vec::new();
    let mut fatals = Vec::new();

    for section in SectionName::EXECUTABLE_SECTIONS {
        let Some(lines) = sections.get(&section) else {
            continue;
        };

        for (line_idx, line) in lines.iter().enumerate() {
            let scan = match tokenize_executables(&line.text) {
                Ok(scan) => scan,
                Err(err) => {
                    fatals.push(Fatal::at(line, err.to_string()));
                    continue;
                }
            };

            for token in scan.tokens.iter().filter(|t| t.kind == TokenKind::Executable) {
                match parse_expression(line, token) {
                    Ok(request) => extracted.push(ExtractedExecutable {
                        section,
                        line: line_idx,
                        source_line_index: line.source_line_index,
                        span: token.span.clone(),
                        request,
                    }),
                    Err(fatal) => fatals.push(fatal),
                }
            }
        }
    }

    if !fatals.is_empty() {
        return Err(fatals);
    }

    debug!(count = extracted.len(), "extracted executables");
    Ok(extracted)
}

fn parse_expression(line: &TemplateLine, token: &Token) -> Result<ExecutableAndArgs, Fatal> {
    let empty = || Fatal::at(line, format!("Empty executable: {}", token.raw));

    if token.content.trim().is_empty() {
        return Err(empty());
    }

    let parts = split_args(&token.content).map_err(|e| Fatal::at(line, e.to_string()))?;
    match parts.split_first() {
        Some((program, args)) => Ok(ExecutableAndArgs::new(program.clone(), args.to_vec())),
        None => Err(empty()),
    }
}
