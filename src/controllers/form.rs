// file: src/controllers/form.rs
// description: create/edit document workflow with validation and topic suggestions

use crate::api::DocumentApi;
use crate::coordinator::LibraryEvent;
use crate::error::{LibraryError, Result};
use crate::models::{Document, DocumentId, DocumentPayload, MANUAL_ENTRY_GENRE};
use crate::navigation::Route;
use crate::utils::Validator;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const TITLE_REQUIRED: &str = "Please enter a document title";
pub const CONTENT_REQUIRED: &str = "Please enter document content";
pub const TOPIC_REQUIRED: &str = "Please select at least one topic";
pub const LOAD_FAILED: &str = "Error loading document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DocumentId),
}

/// Raw field text as typed, plus the checked topic ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentForm {
    pub title: String,
    pub content: String,
    pub authors: String,
    pub year: String,
    pub doi: String,
    pub topics: BTreeSet<i64>,
}

impl DocumentForm {
    pub fn from_document(document: &Document) -> Self {
        Self {
            title: document.title.clone(),
            content: document.content.clone(),
            authors: document.authors.join(", "),
            year: document.year.map(|y| y.to_string()).unwrap_or_default(),
            doi: document.doi.clone().unwrap_or_default(),
            topics: document.topics.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// "Save and add another": the form is blank and back in create mode.
    Reset { event: LibraryEvent },
    Navigate { event: LibraryEvent, route: Route },
}

impl SubmitOutcome {
    pub fn event(&self) -> &LibraryEvent {
        match self {
            SubmitOutcome::Reset { event } | SubmitOutcome::Navigate { event, .. } => event,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// Number of topics newly checked.
    Checked(usize),
    /// No matching topic ids; keywords are advisory only.
    Keywords(Vec<String>),
    Nothing,
}

pub struct FormController<A> {
    api: Arc<A>,
    mode: FormMode,
    form: DocumentForm,
    notice: Option<String>,
}

impl<A: DocumentApi> FormController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            mode: FormMode::Create,
            form: DocumentForm::default(),
            notice: None,
        }
    }

    /// Enters edit mode when `edit` names a document that can be loaded.
    pub async fn open(api: Arc<A>, edit: Option<DocumentId>) -> Self {
        let mut controller = Self::new(api);
        if let Some(id) = edit {
            match controller.api.get_document(&id).await {
                Ok(document) => {
                    debug!("Editing document {}", id);
                    controller.form = DocumentForm::from_document(&document);
                    controller.mode = FormMode::Edit(id);
                }
                Err(e) => {
                    warn!("Could not load document {} for editing: {}", id, e);
                    controller.notice = Some(LOAD_FAILED.to_string());
                }
            }
        }
        controller
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &DocumentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DocumentForm {
        &mut self.form
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn heading(&self) -> String {
        match self.mode {
            FormMode::Create => "Create New Document".to_string(),
            FormMode::Edit(_) => format!("Edit Document: {}", self.form.title),
        }
    }

    pub fn toggle_topic(&mut self, topic_id: i64) -> bool {
        if !self.form.topics.remove(&topic_id) {
            self.form.topics.insert(topic_id);
            return true;
        }
        false
    }

    /// Fills the form from an uploaded text file; the title comes from the
    /// file stem unless one was already typed.
    pub fn load_text_file(&mut self, file_name: &str, text: &str) {
        self.form.content = text.to_string();
        if self.form.title.trim().is_empty() {
            let stem = Path::new(file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name);
            self.form.title = stem.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::require_text(&self.form.title, TITLE_REQUIRED)?;
        Validator::require_text(&self.form.content, CONTENT_REQUIRED)?;
        if self.form.topics.is_empty() {
            return Err(LibraryError::Validation(TOPIC_REQUIRED.to_string()));
        }
        Ok(())
    }

    pub fn payload(&self) -> DocumentPayload {
        DocumentPayload {
            title: self.form.title.trim().to_string(),
            content: self.form.content.trim().to_string(),
            authors: Validator::split_authors(&self.form.authors),
            year: Validator::parse_year(&self.form.year),
            doi: Validator::optional_text(&self.form.doi),
            genre: MANUAL_ENTRY_GENRE.to_string(),
            topics: self.form.topics.iter().copied().collect(),
        }
    }

    /// Validates, then creates or updates. On failure the form is left as
    /// typed so the user can retry.
    pub async fn submit(&mut self, add_another: bool) -> Result<SubmitOutcome> {
        self.validate()?;
        let payload = self.payload();

        let saved = match &self.mode {
            FormMode::Create => self.api.create_document(&payload).await?,
            FormMode::Edit(id) => self.api.update_document(id, &payload).await?,
        };
        info!("Saved document {} ({})", saved.id, saved.title);

        let event = LibraryEvent::Saved(saved.clone());
        if add_another {
            self.reset();
            Ok(SubmitOutcome::Reset { event })
        } else {
            Ok(SubmitOutcome::Navigate {
                event,
                route: Route::Viewer(saved.id),
            })
        }
    }

    pub fn reset(&mut self) {
        self.form = DocumentForm::default();
        self.mode = FormMode::Create;
        self.notice = None;
    }

    /// Asks the backend which topics fit the current title and content.
    pub async fn suggest_topics(&mut self, count: usize) -> Result<Suggestion> {
        let text = format!("{} {}", self.form.title, self.form.content);
        let suggestion = self.api.suggest_topics(text.trim(), count).await?;

        if !suggestion.suggested_topic_ids.is_empty() {
            let checked = suggestion
                .suggested_topic_ids
                .iter()
                .filter(|id| self.form.topics.insert(**id))
                .count();
            debug!("Suggestion checked {} new topics", checked);
            return Ok(Suggestion::Checked(checked));
        }

        if !suggestion.keywords.is_empty() {
            return Ok(Suggestion::Keywords(suggestion.keywords));
        }

        Ok(Suggestion::Nothing)
    }
}
