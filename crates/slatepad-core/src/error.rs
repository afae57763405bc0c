//! Error types shared across the editing core.

use crate::document::DocumentError;
use crate::storage::StorageError;
use thiserror::Error;

/// Input rejected locally before it can reach the document or the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name for your drawing")]
    EmptyName,
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("A path needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("Text must not be empty")]
    EmptyText,
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

/// Errors surfaced by the editor and the autosave orchestrator.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The bound drawing no longer exists in the store; callers may offer "save as new".
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    Store(StorageError),
    #[error("Could not read drawing: {0}")]
    Deserialization(#[from] DocumentError),
    /// A save is already in flight.
    #[error("A save is already in progress")]
    Busy,
}

impl From<StorageError> for EditorError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => EditorError::NotFound(id),
            other => EditorError::Store(other),
        }
    }
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Validate a drawing name the way the save dialog does: trimmed, non-empty,
/// at most `max_len` characters. Returns the trimmed name.
pub fn validate_name(name: &str, max_len: usize) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError::NameTooLong { max: max_len });
    }
    Ok(trimmed.to_string())
}
