// file: src/store/document_store.rs
// description: in-memory document collection with pure filter and search queries

use crate::models::{Document, DocumentId, Fetched};
use tracing::debug;

/// The full collection from the last successful load (or the offline
/// dataset). Queries return new sequences and never reorder `all`.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    all: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, fetched: Fetched<Document>) {
        debug!(
            "Store replaced with {} documents (fallback: {})",
            fetched.items.len(),
            fetched.used_fallback
        );
        self.all = fetched.items;
    }

    pub fn all(&self) -> &[Document] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn apply_filter(&self, topic_id: Option<i64>) -> Vec<Document> {
        match topic_id {
            None => self.all.clone(),
            Some(topic) => self
                .all
                .iter()
                .filter(|d| d.has_topic(topic))
                .cloned()
                .collect(),
        }
    }

    pub fn apply_search(&self, query: &str) -> Vec<Document> {
        Self::search_within(&self.all, query)
    }

    /// Case-insensitive substring match over title, content and genre.
    pub fn search_within(base: &[Document], query: &str) -> Vec<Document> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return base.to_vec();
        }
        base.iter()
            .filter(|d| d.matches_text(&needle))
            .cloned()
            .collect()
    }

    /// Replaces a known document in place, otherwise inserts it first.
    pub fn upsert(&mut self, document: Document) {
        match self.all.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => self.all.insert(0, document),
        }
    }

    pub fn remove(&mut self, id: &DocumentId) -> bool {
        let before = self.all.len();
        self.all.retain(|d| &d.id != id);
        before != self.all.len()
    }
}
