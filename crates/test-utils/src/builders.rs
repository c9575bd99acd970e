#![allow(dead_code)]

use reqtmpl::template::{SectionName, Sections, TemplateLine};

/// Builder for `Sections` to simplify test setup.
///
/// Lines get consecutive source line indices in the order they are added,
/// so fatals can be asserted against the line that produced them.
pub struct SectionsBuilder {
    sections: Sections,
    next_index: usize,
}

impl SectionsBuilder {
    pub fn new() -> Self {
        Self {
            sections: Sections::new(),
            next_index: 0,
        }
    }

    pub fn line(mut self, section: SectionName, text: &str) -> Self {
        let line = TemplateLine::new(text, self.next_index);
        self.sections.entry(section).or_default().push(line);
        self.next_index += 1;
        self
    }

    /// Register a section without content (e.g. an empty `[Body]`).
    pub fn empty(mut self, section: SectionName) -> Self {
        self.sections.entry(section).or_default();
        self
    }

    pub fn build(self) -> Sections {
        self.sections
    }
}

impl Default for SectionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of every line of `section`, in order.
pub fn texts(sections: &Sections, section: SectionName) -> Vec<String> {
    sections
        .get(&section)
        .map(|lines| lines.iter().map(|l| l.text.clone()).collect())
        .unwrap_or_default()
}
