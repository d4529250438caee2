// file: src/store/mod.rs
// description: document store module exports
// reference: internal module structure

mod document_store;
mod sort;

pub use document_store::DocumentStore;
pub use sort::{SortMode, sort};
