// file: src/coordinator/search.rs
// description: merges query, topic filter and sort into one race-safe document view
// reference: request sequencing over async backend calls

use super::debounce::Debouncer;
use super::sequence::{RequestSequence, Ticket};
use super::state::{LibraryEvent, Outcome, TopicChip, ViewState};
use crate::api::DocumentApi;
use crate::error::Result;
use crate::models::{CsvImportReport, Document, DocumentId, GenerationReport, Topic};
use crate::store::{DocumentStore, SortMode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Inner {
    store: DocumentStore,
    topics: Vec<Topic>,
    topics_fallback: bool,
    /// Saves and deletes applied since the last load. `None` marks a delete.
    local_changes: HashMap<DocumentId, Option<Document>>,
    view: ViewState,
}

/// Owns the document store and the listing view.
///
/// Handlers may run concurrently; each captures a [`Ticket`] before its first
/// await and only writes the view if that ticket is still the latest one when
/// its response arrives. The state lock is never held across an await.
pub struct SearchCoordinator<A> {
    api: Arc<A>,
    inner: Mutex<Inner>,
    sequence: RequestSequence,
    debouncer: Debouncer,
}

impl<A: DocumentApi> SearchCoordinator<A> {
    pub fn new(api: Arc<A>, debounce: Duration, sort_mode: SortMode) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                view: ViewState::with_sort(sort_mode),
                ..Inner::default()
            }),
            sequence: RequestSequence::new(),
            debouncer: Debouncer::new(debounce),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    pub fn results(&self) -> Vec<Document> {
        self.lock().view.results.clone()
    }

    pub fn all_documents(&self) -> Vec<Document> {
        self.lock().store.all().to_vec()
    }

    pub fn topics(&self) -> Vec<Topic> {
        self.lock().topics.clone()
    }

    /// Whether the documents came from the offline dataset.
    pub fn used_fallback(&self) -> bool {
        self.lock().view.used_fallback
    }

    /// Whether the topics came from the offline dataset. Set independently of
    /// [`Self::used_fallback`]: either read can fail on its own.
    pub fn topics_used_fallback(&self) -> bool {
        self.lock().topics_fallback
    }

    pub fn topic_chips(&self) -> Vec<TopicChip> {
        let inner = self.lock();
        inner
            .topics
            .iter()
            .map(|t| TopicChip {
                topic_id: t.topic_id,
                label: t.display_name().to_string(),
                active: inner.view.active_filter == Some(t.topic_id),
            })
            .collect()
    }

    /// Fetches documents and topics, then re-derives the view.
    pub async fn load(&self) -> Outcome {
        let (documents, topics) =
            futures::join!(self.api.list_documents(), self.api.list_topics());

        {
            let mut inner = self.lock();
            if documents.used_fallback {
                warn!("Showing offline sample documents");
            }
            if topics.used_fallback {
                warn!("Showing offline sample topics");
            }
            inner.view.used_fallback = documents.used_fallback;
            inner.store.replace_all(documents);
            inner.local_changes.clear();
            inner.topics = topics.items;
            inner.topics_fallback = topics.used_fallback;
            info!(
                "Library loaded: {} documents, {} topics",
                inner.store.len(),
                inner.topics.len()
            );
        }

        self.refresh().await
    }

    /// Keystroke handler. Only the last value typed within the quiet period
    /// reaches the backend.
    pub async fn input_query(&self, text: &str) -> Outcome {
        match self.debouncer.settle(text.to_string()).await {
            Some(settled) => self.search(&settled).await,
            None => {
                debug!("Keystroke '{}' superseded", text);
                Outcome::Debounced
            }
        }
    }

    pub async fn search(&self, query: &str) -> Outcome {
        self.lock().view.query = query.to_string();
        self.refresh().await
    }

    /// Clicking the active chip clears the filter; any other chip replaces it.
    pub async fn toggle_topic(&self, topic_id: i64) -> Outcome {
        {
            let mut inner = self.lock();
            inner.view.active_filter = if inner.view.active_filter == Some(topic_id) {
                None
            } else {
                Some(topic_id)
            };
        }
        self.refresh().await
    }

    pub async fn clear_filter(&self) -> Outcome {
        self.lock().view.active_filter = None;
        self.refresh().await
    }

    /// Reorders the current view; relevance restores the filter/search order.
    pub fn set_sort(&self, mode: SortMode) -> Outcome {
        let mut inner = self.lock();
        inner.view.resort(mode);
        Outcome::Rendered(inner.view.results.clone())
    }

    pub fn apply_event(&self, event: LibraryEvent) -> Outcome {
        let mut inner = self.lock();
        match event {
            LibraryEvent::Saved(document) => {
                inner.store.upsert(document.clone());
                inner
                    .local_changes
                    .insert(document.id.clone(), Some(document.clone()));
                let admitted = inner.view.admits(&document);
                let mut unsorted = std::mem::take(&mut inner.view.unsorted);
                match unsorted.iter().position(|d| d.id == document.id) {
                    Some(index) if admitted => unsorted[index] = document,
                    Some(index) => {
                        unsorted.remove(index);
                    }
                    None if admitted && inner.view.is_unfiltered() => unsorted.insert(0, document),
                    None => {}
                }
                inner.view.show(unsorted);
            }
            LibraryEvent::Deleted(id) => {
                inner.store.remove(&id);
                inner.local_changes.insert(id.clone(), None);
                let mut unsorted = std::mem::take(&mut inner.view.unsorted);
                unsorted.retain(|d| d.id != id);
                inner.view.show(unsorted);
            }
        }
        Outcome::Rendered(inner.view.results.clone())
    }

    /// Asks the backend to rebuild its topic model, then reloads everything.
    pub async fn generate_topics(&self) -> Result<(GenerationReport, Outcome)> {
        let report = self.api.generate_topics().await?;
        let outcome = self.load().await;
        Ok((report, outcome))
    }

    /// Asks the backend to reseed the library from its CSV source, then
    /// reloads everything.
    pub async fn import_csv(&self) -> Result<(CsvImportReport, Outcome)> {
        let report = self.api.load_csv().await?;
        let outcome = self.load().await;
        Ok((report, outcome))
    }

    async fn refresh(&self) -> Outcome {
        let ticket = self.sequence.issue();
        let (query, filter) = {
            let inner = self.lock();
            (inner.view.query.trim().to_string(), inner.view.active_filter)
        };

        let documents = match (query.is_empty(), filter) {
            (true, None) => self.lock().store.apply_filter(None),
            (true, Some(topic_id)) => self.fetch_topic(topic_id).await,
            (false, _) => self.fetch_search(&query, filter).await,
        };

        self.commit(ticket, documents)
    }

    async fn fetch_topic(&self, topic_id: i64) -> Vec<Document> {
        match self.api.filter_documents_by_topic(topic_id).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Topic filter failed, filtering locally: {}", e);
                self.lock().store.apply_filter(Some(topic_id))
            }
        }
    }

    async fn fetch_search(&self, query: &str, filter: Option<i64>) -> Vec<Document> {
        match self.api.search_documents(query).await {
            // The search endpoint has no topic parameter.
            Ok(documents) => documents
                .into_iter()
                .filter(|d| filter.is_none_or(|t| d.has_topic(t)))
                .collect(),
            Err(e) => {
                warn!("Remote search failed, searching locally: {}", e);
                let base = self.lock().store.apply_filter(filter);
                DocumentStore::search_within(&base, query)
            }
        }
    }

    fn commit(&self, ticket: Ticket, documents: Vec<Document>) -> Outcome {
        let mut inner = self.lock();
        if !self.sequence.is_current(ticket) {
            debug!("Discarding stale response for request {}", ticket);
            return Outcome::Stale;
        }
        // The response may predate events applied while it was in flight.
        let documents = documents
            .into_iter()
            .filter_map(|d| match inner.local_changes.get(&d.id) {
                None => Some(d),
                Some(None) => None,
                Some(Some(saved)) => inner.view.admits(saved).then(|| saved.clone()),
            })
            .collect();
        inner.view.show(documents);
        Outcome::Rendered(inner.view.results.clone())
    }
}
