use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Upper bound on note text, counted in characters after trimming.
pub const MAX_NOTE_LENGTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// JSON body for `POST /api/notes`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 10000, message = "Note cannot exceed 10000 characters")
    )]
    pub text: String,
}

impl CreateNoteRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Strips the surrounding whitespace the browser form or API client sent.
    pub fn trimmed(self) -> Self {
        Self {
            text: self.text.trim().to_string(),
        }
    }
}

/// Form body posted by the notes page.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub note: String,
}

impl From<NoteForm> for CreateNoteRequest {
    fn from(form: NoteForm) -> Self {
        Self::new(form.note)
    }
}

/// `?id=` query used by the get and delete endpoints. Kept as a raw string so
/// a missing value and a malformed value can be reported differently.
#[derive(Debug, Default, Deserialize)]
pub struct NoteIdQuery {
    pub id: Option<String>,
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Note cannot be empty".into());
        return Err(error);
    }
    Ok(())
}
