// file: src/models/envelope.rs
// description: wire envelopes for backend responses and request bodies

use super::Document;
use serde::{Deserialize, Serialize};

/// `{documents: [...]}` returned by list, search and filter endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    #[serde(default)]
    pub message: Option<String>,
    pub topics_count: u64,
    pub documents_processed: u64,
}

/// Response of `GET /api/csv/load`, which reseeds the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvImportReport {
    #[serde(default)]
    pub message: Option<String>,
    pub documents_loaded: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub content: String,
    pub num_topics: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    #[serde(default)]
    pub suggested_topic_ids: Vec<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Result of a list read that may have been served from the offline dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub used_fallback: bool,
}

impl<T> Fetched<T> {
    pub fn live(items: Vec<T>) -> Self {
        Self {
            items,
            used_fallback: false,
        }
    }

    pub fn fallback(items: Vec<T>) -> Self {
        Self {
            items,
            used_fallback: true,
        }
    }
}
