//! Structure classification over a structured element stream.
//!
//! The classifier runs four independent passes over the same immutable
//! element slice: title, sections, tables, and references. None of the passes
//! fail; missing structure simply yields empty results. Only table
//! harvesting touches attached resources.
//!
//! # Example
//!
//! ```
//! use pdfsift::classify::Classifier;
//! use pdfsift::model::DocumentElement;
//! use std::collections::HashMap;
//!
//! let elements = vec![
//!     DocumentElement::new("//Document/H1".parse().unwrap()).with_text("Intro"),
//!     DocumentElement::new("//Document/P".parse().unwrap()).with_text("Hello world"),
//! ];
//! let resources: HashMap<String, Vec<u8>> = HashMap::new();
//! let doc = Classifier::new().classify(&elements, &resources);
//! assert_eq!(doc.sections[0].content, vec!["Hello world"]);
//! ```

mod options;
mod references;
mod sections;
mod tables;
mod title;

pub use options::{
    ClassifyOptions, RecaptureMode, DEFAULT_MIN_REFERENCE_LEN, DEFAULT_REFERENCE_LABELS,
    DEFAULT_REFERENCE_SCORE_THRESHOLD,
};
pub use references::{
    capture_references, extract_references, group_lists, has_numeric_tail, score_list,
    select_reference_list, CaptureAction, CaptureEvent, CaptureState,
};
pub use sections::{group_sections, SectionAction, SectionEvent, SectionGrouper, SectionState};
pub use tables::{decode_table, harvest_tables};
pub use title::extract_title;

use crate::model::{Document, DocumentElement, Section, Table};
use crate::parser::ResourceSource;

/// Heuristic structure classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    options: ClassifyOptions,
}

impl Classifier {
    /// Create a classifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom options.
    pub fn with_options(options: ClassifyOptions) -> Self {
        Self { options }
    }

    /// Get the options in use.
    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Document title.
    pub fn title(&self, elements: &[DocumentElement]) -> String {
        extract_title(elements)
    }

    /// Sections in reading order.
    pub fn sections(&self, elements: &[DocumentElement]) -> Vec<Section> {
        group_sections(elements, &self.options)
    }

    /// Tables decoded from their renditions.
    pub fn tables<S>(&self, elements: &[DocumentElement], resources: &S) -> Vec<Table>
    where
        S: ResourceSource + ?Sized,
    {
        harvest_tables(elements, resources)
    }

    /// Bibliographic references.
    pub fn references(&self, elements: &[DocumentElement]) -> Vec<String> {
        extract_references(elements, &self.options)
    }

    /// Run all passes and assemble a document.
    pub fn classify<S>(&self, elements: &[DocumentElement], resources: &S) -> Document
    where
        S: ResourceSource + ?Sized,
    {
        let doc = Document {
            title: self.title(elements),
            sections: self.sections(elements),
            tables: self.tables(elements, resources),
            references: self.references(elements),
        };

        log::debug!(
            "Classified {} elements: {} sections, {} tables, {} references",
            elements.len(),
            doc.sections.len(),
            doc.tables.len(),
            doc.references.len()
        );

        doc
    }
}
