//! Document-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// Structure recovered from one extraction archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Document title, empty if none was tagged
    pub title: String,

    /// Sections in reading order
    pub sections: Vec<Section>,

    /// Tables in reading order
    pub tables: Vec<Table>,

    /// Bibliographic references in reading order
    pub references: Vec<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing at all was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.sections.is_empty()
            && self.tables.is_empty()
            && self.references.is_empty()
    }

    /// Find a section by its exact title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Get plain text of all sections, headings included.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|section| section.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A heading and the body text that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, unmodified
    pub title: String,

    /// Paragraph and list item texts in reading order
    pub content: Vec<String>,
}

impl Section {
    /// Create a section with no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// Append a block of body text.
    pub fn push(&mut self, text: impl Into<String>) {
        self.content.push(text.into());
    }

    /// Check if no body text was collected.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the heading followed by the body text.
    pub fn plain_text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.content.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
