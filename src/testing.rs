// file: src/testing.rs
// description: scripted in-memory backend and fixtures shared by unit tests

use crate::api::{DocumentApi, fallback};
use crate::error::{LibraryError, Result};
use crate::models::{
    CsvImportReport, Document, DocumentId, DocumentPayload, Fetched, GenerationReport, Topic,
    TopicSuggestion,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

pub fn doc(id: &str, title: &str, topics: &[i64]) -> Document {
    Document {
        id: DocumentId::new(id),
        title: title.to_string(),
        content: format!("{} body", title),
        topics: topics.to_vec(),
        topic_names: vec![],
        authors: vec![],
        year: None,
        doi: None,
        genre: None,
        date_added: Some("2025-01-01T00:00:00".to_string()),
        popularity: None,
    }
}

/// Backend double. Every call is recorded as `"<op>[:<arg>]"`; per-call
/// delays are keyed the same way.
#[derive(Default)]
pub struct FakeApi {
    documents: Mutex<Vec<Document>>,
    topics: Mutex<Vec<Topic>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
    suggestion: Mutex<TopicSuggestion>,
    mutation_error: Mutex<Option<String>>,
    offline: AtomicBool,
    search_down: AtomicBool,
    filter_down: AtomicBool,
    topics_down: AtomicBool,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let api = Self::default();
        *api.documents.lock().unwrap() = documents;
        api
    }

    pub fn set_topics(&self, topics: Vec<Topic>) {
        *self.topics.lock().unwrap() = topics;
    }

    pub fn set_delay(&self, call: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(call.to_string(), delay);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_search_down(&self, down: bool) {
        self.search_down.store(down, Ordering::SeqCst);
    }

    pub fn set_filter_down(&self, down: bool) {
        self.filter_down.store(down, Ordering::SeqCst);
    }

    pub fn set_topics_down(&self, down: bool) {
        self.topics_down.store(down, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, message: &str) {
        *self.mutation_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_suggestion(&self, suggestion: TopicSuggestion) {
        *self.suggestion.lock().unwrap() = suggestion;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn stored(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) -> Result<()> {
        let delay = self.delays.lock().unwrap().get(&call).copied();
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(LibraryError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_mutation(&self) -> Result<()> {
        match self.mutation_error.lock().unwrap().clone() {
            Some(message) => Err(LibraryError::Remote {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> LibraryError {
        LibraryError::Remote {
            status: 404,
            message: "Document not found".to_string(),
        }
    }
}

impl DocumentApi for FakeApi {
    async fn list_documents(&self) -> Fetched<Document> {
        match self.enter("list_documents".to_string()).await {
            Ok(()) => Fetched::live(self.stored()),
            Err(_) => Fetched::fallback(fallback::documents()),
        }
    }

    async fn get_document(&self, id: &DocumentId) -> Result<Document> {
        self.enter(format!("get:{}", id)).await?;
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_document(&self, payload: &DocumentPayload) -> Result<Document> {
        self.enter("create".to_string()).await?;
        self.check_mutation()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Document {
            id: DocumentId::new(format!("new-{}", n)),
            title: payload.title.clone(),
            content: payload.content.clone(),
            topics: payload.topics.clone(),
            topic_names: vec![],
            authors: payload.authors.clone(),
            year: payload.year,
            doi: payload.doi.clone(),
            genre: Some(payload.genre.clone()),
            date_added: Some("2026-01-01T00:00:00".to_string()),
            popularity: Some(0.0),
        };
        self.documents.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update_document(&self, id: &DocumentId, payload: &DocumentPayload) -> Result<Document> {
        self.enter(format!("update:{}", id)).await?;
        self.check_mutation()?;
        let mut documents = self.documents.lock().unwrap();
        let existing = documents
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(Self::not_found)?;
        existing.title = payload.title.clone();
        existing.content = payload.content.clone();
        existing.topics = payload.topics.clone();
        existing.authors = payload.authors.clone();
        existing.year = payload.year;
        existing.doi = payload.doi.clone();
        existing.genre = Some(payload.genre.clone());
        Ok(existing.clone())
    }

    async fn delete_document(&self, id: &DocumentId) -> Result<()> {
        self.enter(format!("delete:{}", id)).await?;
        self.check_mutation()?;
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| &d.id != id);
        if documents.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        self.enter(format!("search:{}", query)).await?;
        if self.search_down.load(Ordering::SeqCst) {
            return Err(LibraryError::Remote {
                status: 500,
                message: "Error searching documents".to_string(),
            });
        }
        let needle = query.to_lowercase();
        Ok(self
            .stored()
            .into_iter()
            .filter(|d| d.matches_text(&needle))
            .collect())
    }

    async fn filter_documents_by_topic(&self, topic_id: i64) -> Result<Vec<Document>> {
        self.enter(format!("filter:{}", topic_id)).await?;
        if self.filter_down.load(Ordering::SeqCst) {
            return Err(LibraryError::Remote {
                status: 500,
                message: "Error filtering documents".to_string(),
            });
        }
        Ok(self
            .stored()
            .into_iter()
            .filter(|d| d.has_topic(topic_id))
            .collect())
    }

    async fn list_topics(&self) -> Fetched<Topic> {
        let entered = self.enter("list_topics".to_string()).await;
        if entered.is_err() || self.topics_down.load(Ordering::SeqCst) {
            return Fetched::fallback(fallback::topics());
        }
        Fetched::live(self.topics.lock().unwrap().clone())
    }

    async fn generate_topics(&self) -> Result<GenerationReport> {
        self.enter("generate".to_string()).await?;
        self.check_mutation()?;
        Ok(GenerationReport {
            message: Some("Topics generated successfully".to_string()),
            topics_count: self.topics.lock().unwrap().len() as u64,
            documents_processed: self.documents.lock().unwrap().len() as u64,
        })
    }

    async fn load_csv(&self) -> Result<CsvImportReport> {
        self.enter("load_csv".to_string()).await?;
        self.check_mutation()?;
        Ok(CsvImportReport {
            message: Some("CSV data loaded successfully".to_string()),
            documents_loaded: self.documents.lock().unwrap().len() as u64,
        })
    }

    async fn suggest_topics(&self, text: &str, count: usize) -> Result<TopicSuggestion> {
        self.enter(format!("suggest:{}:{}", count, text)).await?;
        Ok(self.suggestion.lock().unwrap().clone())
    }
}
