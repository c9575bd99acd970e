// src/template/section.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::line::TemplateLine;

/// Named sections of a template.
///
/// Ordering follows declaration order, which is also the order sections are
/// scanned for executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionName {
    Host,
    Query,
    Headers,
    Method,
    Body,
    Backend,
    BackendOptions,
    DefaultVars,
}

impl SectionName {
    /// Sections whose content may contain `$(...)` references.
    pub const EXECUTABLE_SECTIONS: [SectionName; 8] = [
        SectionName::Host,
        SectionName::Query,
        SectionName::Headers,
        SectionName::Method,
        SectionName::Body,
        SectionName::Backend,
        SectionName::BackendOptions,
        SectionName::DefaultVars,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Host => "Host",
            SectionName::Query => "Query",
            SectionName::Headers => "Headers",
            SectionName::Method => "Method",
            SectionName::Body => "Body",
            SectionName::Backend => "Backend",
            SectionName::BackendOptions => "BackendOptions",
            SectionName::DefaultVars => "DefaultVars",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SectionName::EXECUTABLE_SECTIONS
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown section [{wanted}]"))
    }
}

/// Section content keyed by section name.
pub type Sections = BTreeMap<SectionName, Vec<TemplateLine>>;
