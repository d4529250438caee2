// file: src/api/mod.rs
// description: backend gateway trait and its reqwest implementation
// reference: internal module structure

pub mod client;
pub mod fallback;

pub use client::ApiClient;

use crate::error::Result;
use crate::models::{
    CsvImportReport, Document, DocumentId, DocumentPayload, Fetched, GenerationReport, Topic,
    TopicSuggestion,
};
use std::future::Future;

/// One method per backend capability.
///
/// `list_documents` and `list_topics` never fail: an unreachable or failing
/// backend yields the offline dataset with `used_fallback` set. Every other
/// method propagates its failure.
pub trait DocumentApi: Send + Sync {
    fn list_documents(&self) -> impl Future<Output = Fetched<Document>> + Send;

    fn get_document(&self, id: &DocumentId) -> impl Future<Output = Result<Document>> + Send;

    fn create_document(
        &self,
        payload: &DocumentPayload,
    ) -> impl Future<Output = Result<Document>> + Send;

    fn update_document(
        &self,
        id: &DocumentId,
        payload: &DocumentPayload,
    ) -> impl Future<Output = Result<Document>> + Send;

    fn delete_document(&self, id: &DocumentId) -> impl Future<Output = Result<()>> + Send;

    fn search_documents(&self, query: &str) -> impl Future<Output = Result<Vec<Document>>> + Send;

    fn filter_documents_by_topic(
        &self,
        topic_id: i64,
    ) -> impl Future<Output = Result<Vec<Document>>> + Send;

    fn list_topics(&self) -> impl Future<Output = Fetched<Topic>> + Send;

    fn generate_topics(&self) -> impl Future<Output = Result<GenerationReport>> + Send;

    /// Replaces the whole library with the backend's CSV source.
    fn load_csv(&self) -> impl Future<Output = Result<CsvImportReport>> + Send;

    fn suggest_topics(
        &self,
        text: &str,
        count: usize,
    ) -> impl Future<Output = Result<TopicSuggestion>> + Send;
}
