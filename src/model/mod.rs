//! Document model types.
//!
//! This module defines the element stream delivered by the extraction
//! service and the document views recovered from it. The element types are
//! format-agnostic apart from the path convention.

mod document;
mod element;
mod table;

pub use document::{Document, Section};
pub use element::{DocumentElement, ElementKind, ElementPath, EmptyPathError, ROOT_TOKEN};
pub use table::{Record, Table};
