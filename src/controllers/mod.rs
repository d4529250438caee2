// file: src/controllers/mod.rs
// description: form and viewer controllers module exports
// reference: internal module structure

pub mod form;
pub mod viewer;

pub use form::{DocumentForm, FormController, FormMode, SubmitOutcome, Suggestion};
pub use viewer::{Confirm, DeleteOutcome, ViewerController, ViewerState};
