//! JSON rendering for classified documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, Section, Table};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a document to JSON.
///
/// The output has `title`, `sections`, `tables` and `references` keys; each
/// table is a list of records keyed by column name.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Render only the sections, as a list of `{"title", "content"}` objects.
pub fn sections_to_json(sections: &[Section], format: JsonFormat) -> Result<String> {
    serialize(sections, format)
}

/// Render only the references, as a list of strings.
pub fn references_to_json(references: &[String], format: JsonFormat) -> Result<String> {
    serialize(references, format)
}

/// Render tables, each as a list of records.
pub fn tables_to_json(tables: &[Table], format: JsonFormat) -> Result<String> {
    serialize(tables, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.title = "My Paper".to_string();
        let mut intro = Section::new("Intro");
        intro.push("Hello world");
        doc.sections.push(intro);
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.add_row(vec!["1".to_string(), "2".to_string()]);
        doc.tables.push(table);
        doc.references.push("Smith 2020".to_string());
        doc
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "My Paper",
                "sections": [{"title": "Intro", "content": ["Hello world"]}],
                "tables": [[{"a": "1", "b": "2"}]],
                "references": ["Smith 2020"]
            })
        );
    }

    #[test]
    fn test_to_json_pretty_indent() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\n  \"title\": \"My Paper\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&Document::new(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"{"title":"","sections":[],"tables":[],"references":[]}"#
        );
    }

    #[test]
    fn test_partial_views() {
        let doc = sample();
        assert_eq!(
            sections_to_json(&doc.sections, JsonFormat::Compact).unwrap(),
            r#"[{"title":"Intro","content":["Hello world"]}]"#
        );
        assert_eq!(
            references_to_json(&doc.references, JsonFormat::Compact).unwrap(),
            r#"["Smith 2020"]"#
        );
        assert_eq!(
            tables_to_json(&doc.tables, JsonFormat::Compact).unwrap(),
            r#"[[{"a":"1","b":"2"}]]"#
        );
    }
}
