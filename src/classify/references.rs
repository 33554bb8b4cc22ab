//! Reference extraction.
//!
//! References are captured from the blocks that follow a "References" or
//! "Bibliography" heading. When no such heading yields anything, every list in
//! the document is scored on how many of its items end in a number (years,
//! page ranges) and the best list is adopted if it scores high enough.

use indexmap::IndexMap;

use crate::model::DocumentElement;

use super::options::{ClassifyOptions, RecaptureMode};

/// Number of trailing characters inspected when scoring a list item.
const TAIL_WINDOW: usize = 5;

/// Capture state of the heading-driven pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Outside any reference section
    #[default]
    Idle,
    /// Inside a reference section
    Capturing,
    /// Capture has ended for good (only reached with [`RecaptureMode::Once`])
    Done,
}

/// What an element means to the capture pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Heading whose text starts with a reference label
    ReferenceHeading,
    /// Any other heading
    Heading,
    /// Non-heading text long enough to be a reference
    Entry,
    /// Non-heading text that is too short
    Short,
}

/// Effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// Nothing to do
    Skip,
    /// Append the trimmed text to the references
    Collect,
    /// Discard references collected so far
    Reset,
}

impl CaptureState {
    /// Transition on one event.
    pub fn next(self, event: CaptureEvent, mode: RecaptureMode) -> (CaptureState, CaptureAction) {
        use CaptureAction::*;
        use CaptureEvent::*;
        use CaptureState::*;

        match (self, event) {
            (Done, _) => (Done, Skip),
            (Idle, ReferenceHeading) => (Capturing, Skip),
            (Idle, _) => (Idle, Skip),
            (Capturing, ReferenceHeading) => match mode {
                RecaptureMode::Continue => (Capturing, Skip),
                RecaptureMode::Restart => (Capturing, Reset),
                RecaptureMode::Once => (Done, Skip),
            },
            (Capturing, Heading) => match mode {
                RecaptureMode::Once => (Done, Skip),
                _ => (Idle, Skip),
            },
            (Capturing, Entry) => (Capturing, Collect),
            (Capturing, Short) => (Capturing, Skip),
        }
    }
}

impl CaptureEvent {
    /// Classify an element. Elements without text never take part.
    pub fn of(element: &DocumentElement, options: &ClassifyOptions) -> Option<Self> {
        let text = element.text()?;
        let event = if element.path.is_heading() {
            if options.is_reference_heading(text) {
                CaptureEvent::ReferenceHeading
            } else {
                CaptureEvent::Heading
            }
        } else if options.is_reference_length(text) {
            CaptureEvent::Entry
        } else {
            CaptureEvent::Short
        };
        Some(event)
    }
}

/// Extract references: heading capture first, list scoring as fallback.
pub fn extract_references(elements: &[DocumentElement], options: &ClassifyOptions) -> Vec<String> {
    let references = capture_references(elements, options);
    if !references.is_empty() || !options.list_fallback {
        return references;
    }

    log::debug!("No reference heading found, scoring lists");
    select_reference_list(group_lists(elements, options), options.reference_score_threshold)
        .unwrap_or_default()
}

/// Heading-driven pass.
pub fn capture_references(elements: &[DocumentElement], options: &ClassifyOptions) -> Vec<String> {
    let mut state = CaptureState::default();
    let mut references = Vec::new();

    for element in elements {
        let Some(event) = CaptureEvent::of(element, options) else {
            continue;
        };
        let (next, action) = state.next(event, options.recapture);
        state = next;

        match action {
            CaptureAction::Collect => {
                if let Some(text) = element.text() {
                    references.push(text.trim().to_string());
                }
            }
            CaptureAction::Reset => references.clear(),
            CaptureAction::Skip => {}
        }
    }

    references
}

/// Group long-enough list item texts by list identifier, in first-appearance order.
///
/// A list whose items are all too short still gets an (empty) entry.
pub fn group_lists(
    elements: &[DocumentElement],
    options: &ClassifyOptions,
) -> IndexMap<String, Vec<String>> {
    let mut lists: IndexMap<String, Vec<String>> = IndexMap::new();

    for element in elements {
        let (Some(text), Some(list_id)) = (element.text(), element.path.list_id()) else {
            continue;
        };
        let items = lists.entry(list_id.to_string()).or_default();
        if options.is_reference_length(text) {
            items.push(text.trim().to_string());
        }
    }

    lists
}

/// Fraction of items that end in a number. An empty list scores 0.
pub fn score_list(items: &[String]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let numeric = items.iter().filter(|item| has_numeric_tail(item)).count();
    numeric as f64 / items.len() as f64
}

/// Whether the last few characters of an item end in a number such as `2020.` or `12`.
///
/// Only the final whitespace-separated token inside the window counts, and
/// periods are ignored.
pub fn has_numeric_tail(item: &str) -> bool {
    let count = item.chars().count();
    let window: String = item.chars().skip(count.saturating_sub(TAIL_WINDOW)).collect();
    let token = window.split_whitespace().last().unwrap_or_default();
    let digits: String = token.chars().filter(|c| *c != '.').collect();
    !digits.is_empty() && digits.chars().all(char::is_numeric)
}

/// Pick the best-scoring list, first one on ties, if it beats the threshold.
pub fn select_reference_list(
    lists: IndexMap<String, Vec<String>>,
    threshold: f64,
) -> Option<Vec<String>> {
    let mut best: Option<(String, f64)> = None;
    for (id, items) in &lists {
        let score = score_list(items);
        log::debug!("List {} scored {:.2}", id, score);
        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((id.clone(), score));
        }
    }

    let (id, score) = best?;
    if score > threshold {
        lists.get(&id).cloned()
    } else {
        None
    }
}
