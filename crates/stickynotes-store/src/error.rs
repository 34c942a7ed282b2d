//! Error types for the storage layer.

use stickynotes_core::{NoteId, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during note operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Client-supplied note data was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// A note with this ID already exists.
    #[error("duplicate note: {0}")]
    DuplicateNote(NoteId),

    /// A stored row violates the note invariants.
    #[error("invalid note row {id}: {reason}")]
    InvalidRow { id: String, reason: String },

    /// The store is not available (e.g. no database configured).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether the error was caused by the caller rather than the backend.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NoteNotFound(_))
    }
}
