//! Extraction options.

use crate::classify::{ClassifyOptions, RecaptureMode};

/// Options for extracting documents from archives.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Classifier tunables
    pub classify: ClassifyOptions,

    /// Whether batches are processed in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the classifier options.
    pub fn with_classify(mut self, classify: ClassifyOptions) -> Self {
        self.classify = classify;
        self
    }

    /// Set the minimum reference length.
    pub fn with_min_reference_len(mut self, len: usize) -> Self {
        self.classify = self.classify.with_min_reference_len(len);
        self
    }

    /// Set the fallback list score threshold.
    pub fn with_reference_threshold(mut self, threshold: f64) -> Self {
        self.classify = self.classify.with_reference_threshold(threshold);
        self
    }

    /// Set how capture behaves after a second reference heading.
    pub fn with_recapture(mut self, mode: RecaptureMode) -> Self {
        self.classify = self.classify.with_recapture(mode);
        self
    }

    /// Enable or disable the list fallback for references.
    pub fn with_list_fallback(mut self, enabled: bool) -> Self {
        self.classify = self.classify.with_list_fallback(enabled);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            classify: ClassifyOptions::default(),
            parallel: true,
        }
    }
}
