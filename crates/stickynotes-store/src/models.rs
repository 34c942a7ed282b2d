//! Database models for the storage layer.
//!
//! These types map directly to rows of the `notes` table. They are kept
//! separate from [`Note`] so that a row is only turned into a domain value
//! after its invariants have been checked.

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::FromRow;
use stickynotes_core::{HexColor, Note, NoteId, ValidatedNewNote};

use crate::error::StoreError;

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: String,
    pub content: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = StoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let color = HexColor::try_from(row.color).map_err(|e| StoreError::InvalidRow {
            id: row.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(Note {
            id: NoteId::from(row.id),
            content: row.content,
            color,
            created_at: row.created_at,
        })
    }
}

/// Input for inserting a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: NoteId,
    pub content: String,
    pub color: HexColor,
    pub created_at: DateTime<Utc>,
}

impl NewNote {
    /// Stamps a validated note with a fresh ID and the given creation time.
    ///
    /// The timestamp is truncated to microseconds, the resolution PostgreSQL
    /// keeps, so the returned note matches what a later read produces.
    pub fn new(validated: ValidatedNewNote, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::generate(),
            content: validated.content,
            color: validated.color,
            created_at: now.trunc_subsecs(6),
        }
    }
}

impl From<NewNote> for Note {
    fn from(new: NewNote) -> Self {
        Note {
            id: new.id,
            content: new.content,
            color: new.color,
            created_at: new.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_row_with_invalid_color_is_rejected() {
        let row = NoteRow {
            id: "abc".to_string(),
            content: "x".to_string(),
            color: "purple".to_string(),
            created_at: Utc::now(),
        };
        let err = Note::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { .. }));
    }

    #[test]
    fn test_row_converts_to_note() {
        let row = NoteRow {
            id: "abcdefghijkl".to_string(),
            content: "hello".to_string(),
            color: "#fff".to_string(),
            created_at: Utc::now(),
        };
        let note = Note::try_from(row).unwrap();
        assert_eq!(note.id.as_str(), "abcdefghijkl");
        assert_eq!(note.color.as_str(), "#fff");
    }

    #[test]
    fn test_new_note_truncates_to_micros() {
        let validated = ValidatedNewNote {
            content: "x".to_string(),
            color: HexColor::default(),
        };
        let now = Utc::now().with_nanosecond(123_456_789).unwrap();
        let new = NewNote::new(validated, now);
        assert_eq!(new.created_at.nanosecond(), 123_456_000);
    }
}
