//! Structured element stream types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root token every classified path starts with.
pub const ROOT_TOKEN: &str = "Document";

/// A structural path such as `//Document/L[2]/LI/LBody`.
///
/// The path is stored as its non-empty tokens, so the example above becomes
/// `["Document", "L[2]", "LI", "LBody"]`. A path always has at least one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementPath {
    tokens: Vec<String>,
}

/// Error returned when a path string contains no tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPathError;

impl fmt::Display for EmptyPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("element path has no tokens")
    }
}

impl std::error::Error for EmptyPathError {}

impl ElementPath {
    /// Build a path from already split tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, EmptyPathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(EmptyPathError);
        }
        Ok(Self { tokens })
    }

    /// All tokens, root first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token directly below the `Document` root, if the path is rooted there.
    pub fn kind_token(&self) -> Option<&str> {
        match self.tokens.as_slice() {
            [root, kind, ..] if root == ROOT_TOKEN => Some(kind.as_str()),
            _ => None,
        }
    }

    /// Structural kind derived from the kind token.
    pub fn kind(&self) -> ElementKind {
        let Some(token) = self.kind_token() else {
            return ElementKind::Other;
        };

        if token == "Title" && self.tokens.len() == 2 {
            ElementKind::Title
        } else if token.starts_with('H') {
            ElementKind::Heading
        } else if token.starts_with('P') {
            ElementKind::Paragraph
        } else if token.starts_with('L') {
            ElementKind::List
        } else if token.starts_with("Table") {
            ElementKind::Table
        } else {
            ElementKind::Other
        }
    }

    /// Whether this is the document title path (`//Document/Title`).
    pub fn is_title(&self) -> bool {
        self.kind() == ElementKind::Title
    }

    /// Whether this is a heading (`//Document/H...`).
    pub fn is_heading(&self) -> bool {
        self.kind() == ElementKind::Heading
    }

    /// Whether this element contributes body text to a section.
    pub fn is_body_text(&self) -> bool {
        matches!(self.kind(), ElementKind::Paragraph | ElementKind::List)
    }

    /// Whether this is a list element (`//Document/L...`).
    pub fn is_list(&self) -> bool {
        self.kind() == ElementKind::List
    }

    /// Whether this is a top-level table container (`//Document/Table[n]`).
    ///
    /// Rows and cells below the container are folded into the container's
    /// CSV rendition and never count as tables of their own.
    pub fn is_table_container(&self) -> bool {
        self.kind() == ElementKind::Table && self.tokens.len() == 2
    }

    /// Identifier of the enclosing list, e.g. `L[2]` for `//Document/L[2]/LI/LBody`.
    pub fn list_id(&self) -> Option<&str> {
        if self.is_list() {
            self.kind_token()
        } else {
            None
        }
    }
}

impl FromStr for ElementPath {
    type Err = EmptyPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(raw.split('/'))
    }
}

impl TryFrom<String> for ElementPath {
    type Error = EmptyPathError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ElementPath> for String {
    fn from(path: ElementPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            let sep = if i == 0 { "//" } else { "/" };
            write!(f, "{}{}", sep, token)?;
        }
        Ok(())
    }
}

/// Structural role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Document title
    Title,
    /// Heading of any level
    Heading,
    /// Paragraph
    Paragraph,
    /// List or list item
    List,
    /// Table container or table-internal element
    Table,
    /// Anything else (figures, footnotes, unrooted paths)
    Other,
}

/// One node of the structured element stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentElement {
    /// Structural path
    #[serde(rename = "Path")]
    pub path: ElementPath,

    /// Text payload, absent for pure containers
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Names of attached resources (table renditions)
    #[serde(rename = "filePaths", default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl DocumentElement {
    /// Create a container element without text.
    pub fn new(path: ElementPath) -> Self {
        Self {
            path,
            text: None,
            attachments: Vec::new(),
        }
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attachment and return self.
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachments.push(name.into());
        self
    }

    /// Text payload, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First attached resource name, if any.
    pub fn first_attachment(&self) -> Option<&str> {
        self.attachments.first().map(String::as_str)
    }
}
