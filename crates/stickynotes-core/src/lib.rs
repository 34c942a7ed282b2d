//! stickynotes-core: domain types for the sticky notes service.
//!
//! This crate provides:
//! - The persisted [`Note`] record and its identifier type
//! - Hex color parsing with the service default
//! - Input validation for note creation and admin patches
//!
//! Nothing here touches storage or HTTP; the store and server crates
//! build on these types.

pub mod types;
pub mod validation;

pub use types::{DEFAULT_COLOR, HexColor, NOTE_ID_LEN, Note, NoteId};
pub use validation::{
    MAX_CONTENT_LEN, NewNoteInput, NoteChanges, NotePatchInput, ValidatedNewNote,
    ValidationError, coerce_text, is_truthy, validate_new_note, validate_patch,
};
