// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod config;
pub mod controllers;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod navigation;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, DocumentApi};
pub use config::{ApiConfig, BrowserConfig, Config};
pub use controllers::{
    Confirm, DeleteOutcome, DocumentForm, FormController, FormMode, SubmitOutcome, Suggestion,
    ViewerController, ViewerState,
};
pub use coordinator::{LibraryEvent, Outcome, SearchCoordinator, TopicChip, ViewState};
pub use error::{LibraryError, Result};
pub use models::{Document, DocumentId, DocumentPayload, Fetched, Topic};
pub use navigation::Route;
pub use store::{DocumentStore, SortMode};
pub use utils::Validator;
