//! Title extraction.

use crate::model::DocumentElement;

/// Text of the first `//Document/Title` element, or an empty string.
pub fn extract_title(elements: &[DocumentElement]) -> String {
    elements
        .iter()
        .filter(|e| e.path.is_title())
        .find_map(|e| e.text())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(path: &str, text: &str) -> DocumentElement {
        DocumentElement::new(path.parse().unwrap()).with_text(text)
    }

    #[test]
    fn test_first_title_wins() {
        let elements = vec![
            el("//Document/H1", "Heading"),
            el("//Document/Title", "My Paper"),
            el("//Document/Title", "Second"),
        ];
        assert_eq!(extract_title(&elements), "My Paper");
    }

    #[test]
    fn test_nested_title_ignored() {
        let elements = vec![el("//Document/Title/Span", "Nested")];
        assert_eq!(extract_title(&elements), "");
    }

    #[test]
    fn test_no_title() {
        assert_eq!(extract_title(&[]), "");
    }
}
