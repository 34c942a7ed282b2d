//! In-memory note store.
//!
//! Keeps notes in insertion order behind a `tokio::sync::RwLock`. Used by the
//! test suites and for running the server without a database.

use async_trait::async_trait;
use stickynotes_core::{Note, NoteChanges, NoteId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::NewNote;
use crate::store::NoteStore;

/// Note store backed by process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let notes = self.notes.read().await;
        // Newest insertion first, then a stable sort keeps that order for
        // identical timestamps.
        let mut listed: Vec<Note> = notes.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| &n.id == id).cloned())
    }

    async fn insert_note(&self, note: &NewNote) -> StoreResult<Note> {
        let mut notes = self.notes.write().await;
        if notes.iter().any(|n| n.id == note.id) {
            return Err(StoreError::DuplicateNote(note.id.clone()));
        }
        let stored = Note::from(note.clone());
        notes.push(stored.clone());
        Ok(stored)
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> StoreResult<u64> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.iter_mut().find(|n| &n.id == id) else {
            return Ok(0);
        };
        if let Some(content) = &changes.content {
            note.content = content.clone();
        }
        if let Some(color) = &changes.color {
            note.color = color.clone();
        }
        Ok(1)
    }

    async fn delete_note(&self, id: &NoteId) -> StoreResult<u64> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        Ok((before - notes.len()) as u64)
    }
}
