//! Core data types for the sticky notes service.
//!
//! A [`Note`] is the only persisted entity. Its identifier is a short random
//! string drawn from a URL-safe alphabet, and its color is always a valid
//! `#RGB` / `#RRGGBB` hex string.

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Length of generated note identifiers.
pub const NOTE_ID_LEN: usize = 12;

/// URL-safe alphabet for note identifiers. Exactly 64 symbols, so masking a
/// random byte with `0x3f` picks a symbol without bias.
const NOTE_ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Opaque identifier of a note.
///
/// Generated server-side on creation. Identifiers arriving from clients (URL
/// path segments) are accepted verbatim; an unknown identifier simply does not
/// match any note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh random identifier using the OS random source.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; NOTE_ID_LEN];
        OsRng.fill_bytes(&mut bytes);
        let id = bytes
            .iter()
            .map(|b| NOTE_ID_ALPHABET[(b & 0x3f) as usize] as char)
            .collect();
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Color
// ============================================================================

/// Color assigned to notes created without a usable color.
pub const DEFAULT_COLOR: &str = "#FDE68A";

/// A note color in `#RGB` or `#RRGGBB` form (hex digits in either case).
///
/// The original spelling is preserved; `#abc` stays `#abc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parses a hex color, returning `None` if `value` is not `#RGB` or `#RRGGBB`.
    ///
    /// No trimming is performed here; callers decide how to treat surrounding
    /// whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::is_valid(value).then(|| Self(value.to_string()))
    }

    /// Whether `value` matches `#RGB` or `#RRGGBB`.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        let Some(digits) = value.strip_prefix('#') else {
            return false;
        };
        matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct InvalidHexColor(pub String);

impl FromStr for HexColor {
    type Err = InvalidHexColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidHexColor(s.to_string()))
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidHexColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidHexColor(value))
        }
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

// ============================================================================
// Note
// ============================================================================

/// A persisted sticky note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Server-generated identifier, immutable.
    pub id: NoteId,
    /// Trimmed note text, 1 to 1000 characters.
    pub content: String,
    /// Display color.
    pub color: HexColor,
    /// Creation time. Set once, never changed.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// ISO-8601 UTC timestamps with millisecond precision, e.g.
/// `2026-10-16T08:30:00.123Z`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
