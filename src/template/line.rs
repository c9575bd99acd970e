// src/template/line.rs

use std::fmt;

/// One line of section content plus where it came from in the template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLine {
    pub text: String,
    /// 0-based index into the template's source lines.
    pub source_line_index: usize,
}

impl TemplateLine {
    pub fn new(text: impl Into<String>, source_line_index: usize) -> Self {
        Self {
            text: text.into(),
            source_line_index,
        }
    }
}

/// A diagnostic that prevents resolving the template.
///
/// Fatals are collected rather than returned on first sight so one run can
/// report every problem in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal {
    pub message: String,
    pub source_line_index: Option<usize>,
}

impl Fatal {
    /// A fatal attributed to `line`.
    pub fn at(line: &TemplateLine, message: impl Into<String>) -> Self {
        Self::at_index(line.source_line_index, message)
    }

    pub fn at_index(source_line_index: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_line_index: Some(source_line_index),
        }
    }

    /// A fatal about the template as a whole.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_line_index: None,
        }
    }
}

/// Every fatal of one run, together with the source lines needed to show
/// the user what they wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFatals {
    pub fatals: Vec<Fatal>,
    source: Vec<String>,
}

impl TemplateFatals {
    pub fn new(fatals: Vec<Fatal>, source: Vec<String>) -> Self {
        Self { fatals, source }
    }

    pub fn len(&self) -> usize {
        self.fatals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fatals.is_empty()
    }
}

impl fmt::Display for TemplateFatals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fatal) in self.fatals.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match fatal.source_line_index {
                Some(index) => {
                    let number = index + 1;
                    writeln!(f, "Error on line {number}: {}", fatal.message)?;
                    let raw = self.source.get(index).map(String::as_str).unwrap_or("");
                    write!(f, "{number:>4} > {raw}")?;
                }
                None => write!(f, "Error: {}", fatal.message)?,
            }
        }
        Ok(())
    }
}
