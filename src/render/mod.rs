//! Rendering module for writing classified documents out.

mod json;

pub use json::{references_to_json, sections_to_json, tables_to_json, to_json, JsonFormat};
