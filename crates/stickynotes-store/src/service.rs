//! Note service: validation plus execution against a [`NoteStore`].
//!
//! Every operation validates its input completely before issuing any store
//! call, so a rejected request never leaves a partial write behind. Store
//! failures are passed through untouched; nothing here retries.

use std::sync::Arc;

use chrono::Utc;
use stickynotes_core::{
    NewNoteInput, Note, NoteId, NotePatchInput, validate_new_note, validate_patch,
};

use crate::error::{StoreError, StoreResult};
use crate::models::NewNote;
use crate::store::NoteStore;

/// Domain-level note operations over a shared store handle.
///
/// Cheap to clone; all clones share the same store.
#[derive(Debug, Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &dyn NoteStore {
        self.store.as_ref()
    }

    /// All notes, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Note>> {
        self.store.list_notes().await
    }

    /// Validate and persist a new note.
    ///
    /// A malformed color silently becomes the default color.
    pub async fn create(&self, input: &NewNoteInput) -> StoreResult<Note> {
        let validated = validate_new_note(input)?;
        let new_note = NewNote::new(validated, Utc::now());
        let note = self.store.insert_note(&new_note).await?;

        tracing::info!(note_id = %note.id, color = %note.color, "Note created");
        Ok(note)
    }

    /// Apply a partial update and return the note as stored afterwards.
    ///
    /// Unlike [`create`](Self::create), a malformed color is rejected.
    pub async fn update(&self, id: &NoteId, input: &NotePatchInput) -> StoreResult<Note> {
        let changes = validate_patch(input)?;

        let affected = self.store.update_note(id, &changes).await?;
        if affected == 0 {
            return Err(StoreError::NoteNotFound(id.clone()));
        }

        // Re-read so the response reflects fields the patch did not touch. A
        // concurrent delete between the two calls surfaces as not found.
        let note = self
            .store
            .get_note(id)
            .await?
            .ok_or_else(|| StoreError::NoteNotFound(id.clone()))?;

        tracing::info!(
            note_id = %id,
            content_changed = changes.content.is_some(),
            color_changed = changes.color.is_some(),
            "Note updated"
        );
        Ok(note)
    }

    /// Remove a note.
    pub async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let affected = self.store.delete_note(id).await?;
        if affected == 0 {
            return Err(StoreError::NoteNotFound(id.clone()));
        }

        tracing::info!(note_id = %id, "Note deleted");
        Ok(())
    }
}
