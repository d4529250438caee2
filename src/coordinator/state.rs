// file: src/coordinator/state.rs
// description: view state, render instructions and library change events

use crate::models::{Document, DocumentId};
use crate::store::{SortMode, sort};

/// What the listing currently shows. `results` is always
/// `sort(sort_mode, unsorted)` and is never written back to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub active_filter: Option<i64>,
    pub sort_mode: SortMode,
    pub unsorted: Vec<Document>,
    pub results: Vec<Document>,
    pub used_fallback: bool,
}

impl ViewState {
    pub fn with_sort(sort_mode: SortMode) -> Self {
        Self {
            sort_mode,
            ..Self::default()
        }
    }

    pub(crate) fn show(&mut self, documents: Vec<Document>) {
        self.results = sort(self.sort_mode, &documents);
        self.unsorted = documents;
    }

    pub(crate) fn resort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.results = sort(mode, &self.unsorted);
    }

    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn is_unfiltered(&self) -> bool {
        !self.has_query() && self.active_filter.is_none()
    }

    /// Whether `document` belongs in the view under the current query/filter.
    pub fn admits(&self, document: &Document) -> bool {
        let topic_ok = self.active_filter.is_none_or(|t| document.has_topic(t));
        let query = self.query.trim().to_lowercase();
        topic_ok && (query.is_empty() || document.matches_text(&query))
    }
}

/// Render instruction returned by every coordinator handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The view changed; render these documents.
    Rendered(Vec<Document>),
    /// A newer request superseded this one; nothing was written.
    Stale,
    /// A newer keystroke arrived inside the quiet period.
    Debounced,
}

impl Outcome {
    pub fn rendered(&self) -> Option<&[Document]> {
        match self {
            Outcome::Rendered(docs) => Some(docs),
            _ => None,
        }
    }
}

/// Changes made by the form and viewer that the listing must reflect.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryEvent {
    Saved(Document),
    Deleted(DocumentId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicChip {
    pub topic_id: i64,
    pub label: String,
    pub active: bool,
}
