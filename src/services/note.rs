use crate::error::{AppError, AppResult};
use crate::models::{CreateNoteRequest, Note, NoteIdQuery};
use crate::repositories::NoteStore;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// Request-facing wrapper around [`NoteStore`]: normalizes and validates input
/// before it reaches the store, and logs mutations.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    pub fn create_note(&self, request: CreateNoteRequest) -> AppResult<Note> {
        let request = request.trimmed();
        request.validate()?;

        let note = self.store.create(request.text)?;
        info!(note_id = note.id, length = note.text.chars().count(), "Note created");
        Ok(note)
    }

    pub fn list_notes(&self) -> Vec<Note> {
        let notes = self.store.list();
        debug!(count = notes.len(), "Listed notes");
        notes
    }

    pub fn get_note(&self, note_id: i64) -> AppResult<Note> {
        Ok(self.store.get_by_id(note_id)?)
    }

    pub fn delete_note(&self, note_id: i64) -> AppResult<Note> {
        let note = self.store.delete_by_id(note_id)?;
        info!(note_id = note.id, "Note deleted");
        Ok(note)
    }

    pub fn note_count(&self) -> usize {
        self.store.len()
    }
}

/// Parses the `id` query parameter. A missing or empty value and a value that
/// is not an integer are reported with different messages. The value is not
/// trimmed, so padded ids are malformed.
pub fn parse_note_id(query: &NoteIdQuery) -> AppResult<i64> {
    let raw = query.id.as_deref().unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::BadRequest("ID parameter cannot be empty.".to_string()));
    }

    raw.parse::<i64>().map_err(|e| {
        debug!(id = raw, error = %e, "Rejected malformed note id");
        AppError::BadRequest("Invalid ID".to_string())
    })
}
