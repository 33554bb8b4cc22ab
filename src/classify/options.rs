//! Classifier tunables.

/// Default minimum reference length; shorter texts are never references.
pub const DEFAULT_MIN_REFERENCE_LEN: usize = 4;

/// Default score a list must exceed to be adopted as the reference list.
pub const DEFAULT_REFERENCE_SCORE_THRESHOLD: f64 = 0.85;

/// Default heading prefixes that open a reference section.
pub const DEFAULT_REFERENCE_LABELS: [&str; 2] = ["references", "bibliography"];

/// Options for structure classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOptions {
    /// Texts must be longer than this many characters (after trimming) to count as references
    pub min_reference_len: usize,

    /// Score a list must strictly exceed to be adopted by the list fallback
    pub reference_score_threshold: f64,

    /// Lower-case heading prefixes that open a reference section
    pub reference_labels: Vec<String>,

    /// What a reference heading does inside an open reference section
    pub recapture: RecaptureMode,

    /// Whether to score lists when no reference heading was found
    pub list_fallback: bool,

    /// Whether reference headings also open sections in the section view.
    ///
    /// Off by default, so a paper with an introduction and a reference list
    /// yields only the introduction section.
    pub reference_sections: bool,
}

impl ClassifyOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum reference length.
    pub fn with_min_reference_len(mut self, len: usize) -> Self {
        self.min_reference_len = len;
        self
    }

    /// Set the list fallback threshold.
    pub fn with_reference_threshold(mut self, threshold: f64) -> Self {
        self.reference_score_threshold = threshold;
        self
    }

    /// Replace the reference heading labels. Matching is case-insensitive.
    pub fn with_reference_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reference_labels = labels
            .into_iter()
            .map(|l| l.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Set the recapture mode.
    pub fn with_recapture(mut self, mode: RecaptureMode) -> Self {
        self.recapture = mode;
        self
    }

    /// Enable or disable the list fallback.
    pub fn with_list_fallback(mut self, enabled: bool) -> Self {
        self.list_fallback = enabled;
        self
    }

    /// Include or leave out reference blocks in the section view.
    pub fn with_reference_sections(mut self, include: bool) -> Self {
        self.reference_sections = include;
        self
    }

    /// Whether a heading text opens a reference section.
    pub fn is_reference_heading(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.reference_labels
            .iter()
            .any(|label| lower.starts_with(&label.to_lowercase()))
    }

    /// Whether a text is long enough to be a reference once trimmed.
    pub fn is_reference_length(&self, text: &str) -> bool {
        text.trim().chars().count() > self.min_reference_len
    }
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            min_reference_len: DEFAULT_MIN_REFERENCE_LEN,
            reference_score_threshold: DEFAULT_REFERENCE_SCORE_THRESHOLD,
            reference_labels: DEFAULT_REFERENCE_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            recapture: RecaptureMode::Continue,
            list_fallback: true,
            reference_sections: false,
        }
    }
}

/// Handling of a reference heading that appears while references are being captured.
///
/// A reference heading after a capture has ended always reopens capture,
/// except in [`RecaptureMode::Once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecaptureMode {
    /// Keep capturing and keep what was collected
    #[default]
    Continue,
    /// Drop what was collected so far and capture afresh
    Restart,
    /// Only the first reference heading opens capture; later ones end it like any heading
    Once,
}
