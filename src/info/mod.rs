//! Document information sources.
//!
//! A [`DocumentInfo`] exposes the four views recovered from a document:
//! title, sections, tables, and references. [`StructuredDocumentInfo`] is the
//! implementation for extraction archives carrying `structuredData.json`;
//! other structured inputs can implement the trait without touching the
//! classifier.
//!
//! # Example
//!
//! ```no_run
//! use pdfsift::info::{DocumentInfo, StructuredDocumentInfo};
//!
//! fn main() -> pdfsift::Result<()> {
//!     let info = StructuredDocumentInfo::open("output/paper.zip")?;
//!     println!("{}", info.title());
//!     for reference in info.references() {
//!         println!("- {}", reference);
//!     }
//!     Ok(())
//! }
//! ```

mod structured;

pub use structured::StructuredDocumentInfo;

use crate::model::{Document, Section, Table};

/// The views recovered from one document.
///
/// Each view is computed on demand and never fails; absent structure yields
/// empty results.
pub trait DocumentInfo {
    /// Document title, empty if none.
    fn title(&self) -> String;

    /// Sections in reading order.
    fn sections(&self) -> Vec<Section>;

    /// Tables in reading order.
    fn tables(&self) -> Vec<Table>;

    /// Bibliographic references.
    fn references(&self) -> Vec<String>;

    /// Collect every view into a document.
    fn to_document(&self) -> Document {
        Document {
            title: self.title(),
            sections: self.sections(),
            tables: self.tables(),
            references: self.references(),
        }
    }
}
