//! Section grouping.
//!
//! Headings open sections; paragraph and list text is appended to the most
//! recently opened one. Text that precedes the first heading is dropped.
//!
//! A heading that opens a reference block (see [`ClassifyOptions`]) is left
//! to the reference pass unless `reference_sections` is set: it opens no
//! section and the text below it is skipped until the next heading.

use crate::model::{DocumentElement, Section};

use super::options::ClassifyOptions;

/// Grouping state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// No heading seen yet
    #[default]
    NoSection,
    /// At least one section is open
    InSection,
    /// Inside a reference block that the section view leaves out
    InReferences,
}

/// What an element means to the grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent {
    /// A heading with text
    Heading,
    /// A heading that opens a reference block
    ReferenceHeading,
    /// A paragraph or list element with text
    Body,
    /// Anything else
    Other,
}

/// Effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    /// Open a new section titled with the element text
    Open,
    /// Append the element text to the current section
    Append,
    /// Drop the element
    Skip,
}

impl SectionState {
    /// Transition on one event.
    pub fn next(self, event: SectionEvent) -> (SectionState, SectionAction) {
        match (self, event) {
            (_, SectionEvent::Heading) => (SectionState::InSection, SectionAction::Open),
            (_, SectionEvent::ReferenceHeading) => {
                (SectionState::InReferences, SectionAction::Skip)
            }
            (SectionState::InSection, SectionEvent::Body) => {
                (SectionState::InSection, SectionAction::Append)
            }
            (state, _) => (state, SectionAction::Skip),
        }
    }
}

impl SectionEvent {
    /// Classify an element. Elements without text never take part.
    pub fn of(element: &DocumentElement, options: &ClassifyOptions) -> Self {
        let Some(text) = element.text() else {
            return SectionEvent::Other;
        };

        if element.path.is_heading() {
            if !options.reference_sections && options.is_reference_heading(text) {
                SectionEvent::ReferenceHeading
            } else {
                SectionEvent::Heading
            }
        } else if element.path.is_body_text() {
            SectionEvent::Body
        } else {
            SectionEvent::Other
        }
    }
}

/// Incremental section grouper.
#[derive(Debug)]
pub struct SectionGrouper<'a> {
    options: &'a ClassifyOptions,
    state: SectionState,
    sections: Vec<Section>,
}

impl<'a> SectionGrouper<'a> {
    /// Create a grouper in the `NoSection` state.
    pub fn new(options: &'a ClassifyOptions) -> Self {
        Self {
            options,
            state: SectionState::NoSection,
            sections: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Feed one element.
    pub fn feed(&mut self, element: &DocumentElement) {
        let (state, action) = self.state.next(SectionEvent::of(element, self.options));
        self.state = state;

        let text = element.text().unwrap_or_default();
        match action {
            SectionAction::Open => self.sections.push(Section::new(text)),
            SectionAction::Append => {
                if let Some(section) = self.sections.last_mut() {
                    section.push(text);
                }
            }
            SectionAction::Skip => {}
        }
    }

    /// Finish grouping. Sections without content are kept.
    pub fn finish(self) -> Vec<Section> {
        self.sections
    }
}

/// Group an element stream into sections.
pub fn group_sections(elements: &[DocumentElement], options: &ClassifyOptions) -> Vec<Section> {
    let mut grouper = SectionGrouper::new(options);
    for element in elements {
        grouper.feed(element);
    }
    grouper.finish()
}
