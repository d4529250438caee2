// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod envelope;
pub mod topic;

pub use document::{Document, DocumentId, DocumentPayload, MANUAL_ENTRY_GENRE};
pub use envelope::{
    CsvImportReport, DocumentList, ErrorBody, Fetched, GenerationReport, SuggestRequest,
    TopicSuggestion,
};
pub use topic::Topic;
