// file: src/controllers/viewer.rs
// description: single-document viewer with confirmed delete and plain-text export

use crate::api::DocumentApi;
use crate::coordinator::LibraryEvent;
use crate::error::Result;
use crate::models::{Document, DocumentId};
use crate::navigation::Route;
use crate::utils::Validator;
use std::sync::Arc;
use tracing::{info, warn};

pub const NOT_FOUND_TITLE: &str = "Document Not Found";
pub const NOT_FOUND_MESSAGE: &str =
    "The document you're looking for doesn't exist or has been removed.";

/// Yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    Loaded(Document),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted { event: LibraryEvent, route: Route },
}

pub struct ViewerController<A> {
    api: Arc<A>,
    state: ViewerState,
}

impl<A: DocumentApi> ViewerController<A> {
    /// Never fails: a missing id or failed lookup yields `NotFound`.
    pub async fn open(api: Arc<A>, id: Option<DocumentId>) -> Self {
        let state = match id {
            None => ViewerState::NotFound,
            Some(id) => match api.get_document(&id).await {
                Ok(document) => ViewerState::Loaded(document),
                Err(e) => {
                    warn!("Document {} could not be loaded: {}", id, e);
                    ViewerState::NotFound
                }
            },
        };
        Self { api, state }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            ViewerState::Loaded(document) => Some(document),
            ViewerState::NotFound => None,
        }
    }

    pub fn render(&self) -> String {
        match &self.state {
            ViewerState::Loaded(document) => render_document(document),
            ViewerState::NotFound => format!(
                "{}\n\n{}\n\n← Back to Home: {}",
                NOT_FOUND_TITLE,
                NOT_FOUND_MESSAGE,
                Route::listing().to_href()
            ),
        }
    }

    pub fn edit_route(&self) -> Option<Route> {
        self.document().map(|d| Route::Editor(Some(d.id.clone())))
    }

    /// Relative link that reopens this document in the viewer.
    pub fn share_link(&self) -> Option<String> {
        self.document()
            .map(|d| Route::Viewer(d.id.clone()).to_href())
    }

    pub fn topic_route(&self, topic_id: i64) -> Route {
        Route::Listing {
            filter: Some(topic_id),
        }
    }

    /// Filename and body for saving the document as plain text.
    pub fn export_text(&self) -> Option<(String, String)> {
        self.document().map(|d| {
            (
                format!("{}.txt", Validator::sanitize_filename(&d.title)),
                format!("{}\n\n{}", d.title, d.content),
            )
        })
    }

    /// Deletes after an explicit yes. On failure the document stays shown.
    pub async fn delete(&mut self, confirm: &impl Confirm) -> Result<DeleteOutcome> {
        let Some(document) = self.document() else {
            return Ok(DeleteOutcome::Cancelled);
        };

        let prompt = format!("Delete \"{}\"? This cannot be undone.", document.title);
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let id = document.id.clone();
        self.api.delete_document(&id).await?;
        info!("Document {} deleted", id);

        self.state = ViewerState::NotFound;
        Ok(DeleteOutcome::Deleted {
            event: LibraryEvent::Deleted(id),
            route: Route::listing(),
        })
    }
}

fn render_document(document: &Document) -> String {
    let mut out = String::new();
    out.push_str(&document.title);
    out.push('\n');

    if !document.topic_names.is_empty() {
        out.push_str(&format!("Topics: {}\n", document.topic_names.join(", ")));
    }
    if !document.authors.is_empty() {
        out.push_str(&format!("Authors: {}\n", document.authors.join(", ")));
    }
    if let Some(year) = document.year {
        out.push_str(&format!("Year: {}\n", year));
    }
    if let Some(doi) = &document.doi {
        out.push_str(&format!("DOI: {}\n", doi));
    }
    if let Some(added) = document.date_added_at() {
        out.push_str(&format!("Date Added: {}\n", added.format("%B %-d, %Y")));
    }

    out.push('\n');
    out.push_str(&document.content);
    out
}
