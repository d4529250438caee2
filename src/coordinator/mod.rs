// file: src/coordinator/mod.rs
// description: search/filter coordination module exports
// reference: internal module structure

mod debounce;
mod search;
mod sequence;
mod state;

pub use debounce::Debouncer;
pub use search::SearchCoordinator;
pub use sequence::{RequestSequence, Ticket};
pub use state::{LibraryEvent, Outcome, TopicChip, ViewState};
