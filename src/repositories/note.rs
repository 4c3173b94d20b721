use crate::error::StoreError;
use crate::models::Note;
use chrono::Utc;
use parking_lot::Mutex;

/// In-memory owner of every note for the lifetime of the process.
///
/// The note list and the id counter live behind a single mutex, so each
/// operation is one critical section. None of them await while holding the
/// lock.
#[derive(Debug)]
pub struct NoteStore {
    inner: Mutex<NoteStoreInner>,
}

#[derive(Debug)]
struct NoteStoreInner {
    notes: Vec<Note>,
    next_id: i64,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(NoteStoreInner {
                notes: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Appends a note with the next id. Callers are expected to have trimmed
    /// the text already; only the empty string is rejected here.
    pub fn create(&self, text: impl Into<String>) -> Result<Note, StoreError> {
        let text = text.into();
        if text.is_empty() {
            return Err(StoreError::InvalidInput("Note cannot be empty".to_string()));
        }

        let mut inner = self.inner.lock();
        let note = Note {
            id: inner.next_id,
            text,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.notes.push(note.clone());

        Ok(note)
    }

    /// Snapshot of all notes in creation order.
    pub fn list(&self) -> Vec<Note> {
        self.inner.lock().notes.clone()
    }

    pub fn get_by_id(&self, id: i64) -> Result<Note, StoreError> {
        self.inner
            .lock()
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Removes the matching note; the remaining notes keep their order.
    pub fn delete_by_id(&self, id: i64) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock();
        let position = inner
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))?;

        Ok(inner.notes.remove(position))
    }

    pub fn len(&self) -> usize {
        self.inner.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
