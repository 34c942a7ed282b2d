//! Input validation for note creation and admin patches.
//!
//! Request bodies arrive with loosely typed fields (`serde_json::Value`) and
//! are only trusted after passing through [`validate_new_note`] or
//! [`validate_patch`]. The two paths treat a bad color differently: creation
//! falls back to [`DEFAULT_COLOR`](crate::DEFAULT_COLOR), a patch rejects it.

use serde::Deserialize;
use serde_json::Value;

use crate::types::HexColor;

/// Maximum note length after trimming, in UTF-16 code units.
pub const MAX_CONTENT_LEN: usize = 1000;

/// Reasons a note input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Content is missing or blank after trimming.
    #[error("content required")]
    ContentRequired,

    /// Content exceeds [`MAX_CONTENT_LEN`] after trimming.
    #[error("content too long (max {max} characters)")]
    ContentTooLong { max: usize },

    /// Color supplied in a patch is not `#RGB` or `#RRGGBB`.
    #[error("invalid color format")]
    InvalidColor,

    /// A patch carried neither content nor color.
    #[error("no changes submitted")]
    NoChanges,
}

/// Raw body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNoteInput {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedNewNote {
    pub content: String,
    pub color: HexColor,
}

/// Raw body of an update request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotePatchInput {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
}

/// Validated partial update. At least one field is `Some` when produced by
/// [`validate_patch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub content: Option<String>,
    pub color: Option<HexColor>,
}

impl NoteChanges {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.color.is_none()
    }
}

/// Validates a create request.
///
/// Content is coerced to text, trimmed, and must be 1..=1000 long. The color
/// goes through the same coercion; if the result is not a hex color the
/// default is used instead.
pub fn validate_new_note(input: &NewNoteInput) -> Result<ValidatedNewNote, ValidationError> {
    let content = validate_content(&coerce_text(input.content.as_ref()))?;

    let color = HexColor::parse(trim(&coerce_text(input.color.as_ref()))).unwrap_or_default();

    Ok(ValidatedNewNote { content, color })
}

/// Validates an update request.
///
/// Only string fields count as present; anything else is ignored as if it
/// were omitted.
pub fn validate_patch(input: &NotePatchInput) -> Result<NoteChanges, ValidationError> {
    let mut changes = NoteChanges::default();

    if let Some(Value::String(raw)) = input.content.as_ref() {
        changes.content = Some(validate_content(raw)?);
    }

    if let Some(Value::String(raw)) = input.color.as_ref() {
        let color = HexColor::parse(trim(raw)).ok_or(ValidationError::InvalidColor)?;
        changes.color = Some(color);
    }

    if changes.is_empty() {
        return Err(ValidationError::NoChanges);
    }
    Ok(changes)
}

fn validate_content(raw: &str) -> Result<String, ValidationError> {
    let trimmed = trim(raw);
    if trimmed.is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    if trimmed.encode_utf16().count() > MAX_CONTENT_LEN {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Trims the whitespace set browsers strip from form input.
fn trim(value: &str) -> &str {
    value.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

/// Whether a JSON value counts as "set" for a required field.
///
/// `null`, `false`, `0` and `""` are unset; every other value, including
/// empty arrays and objects, is set.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces an arbitrary JSON value to its textual form.
///
/// Unset values (see [`is_truthy`]) become the empty string. Otherwise this
/// follows JavaScript's `String(value)`: arrays join their elements with `,`,
/// objects render as `[object Object]` and numbers use the shortest
/// round-trip form, switching to exponent notation outside `[1e-6, 1e21)`.
#[must_use]
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => stringify(v),
        _ => String::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => number_text(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    // `{:e}` gives "1e21" or "1.5e-7"; positive exponents carry a sign.
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_note(body: Value) -> Result<ValidatedNewNote, ValidationError> {
        let input: NewNoteInput = serde_json::from_value(body).unwrap();
        validate_new_note(&input)
    }

    fn patch(body: Value) -> Result<NoteChanges, ValidationError> {
        let input: NotePatchInput = serde_json::from_value(body).unwrap();
        validate_patch(&input)
    }

    #[test]
    fn test_create_trims_content() {
        let note = new_note(json!({"content": "  buy milk \n"})).unwrap();
        assert_eq!(note.content, "buy milk");
        assert_eq!(note.color.as_str(), "#FDE68A");
    }

    #[test]
    fn test_create_rejects_blank_content() {
        for body in [
            json!({}),
            json!({"content": null}),
            json!({"content": ""}),
            json!({"content": "   \t\n"}),
            json!({"content": "\u{feff}\u{a0}"}),
            json!({"content": false}),
            json!({"content": 0}),
            json!({"content": []}),
        ] {
            assert_eq!(
                new_note(body.clone()),
                Err(ValidationError::ContentRequired),
                "{body}"
            );
        }
    }

    #[test]
    fn test_create_length_boundary() {
        let exact = "x".repeat(MAX_CONTENT_LEN);
        assert_eq!(new_note(json!({ "content": exact })).unwrap().content.len(), 1000);

        let padded = format!("   {}   ", "y".repeat(MAX_CONTENT_LEN));
        assert!(new_note(json!({ "content": padded })).is_ok());

        let over = "z".repeat(MAX_CONTENT_LEN + 1);
        assert_eq!(
            new_note(json!({ "content": over })),
            Err(ValidationError::ContentTooLong { max: 1000 })
        );
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // Each emoji is two UTF-16 code units.
        let ok = "\u{1F600}".repeat(500);
        assert!(new_note(json!({ "content": ok })).is_ok());

        let over = "\u{1F600}".repeat(501);
        assert!(matches!(
            new_note(json!({ "content": over })),
            Err(ValidationError::ContentTooLong { .. })
        ));
    }

    #[test]
    fn test_create_coerces_non_string_content() {
        assert_eq!(new_note(json!({"content": 42})).unwrap().content, "42");
        assert_eq!(new_note(json!({"content": 1.5})).unwrap().content, "1.5");
        assert_eq!(new_note(json!({"content": true})).unwrap().content, "true");
        assert_eq!(new_note(json!({"content": ["a", 1, null]})).unwrap().content, "a,1,");
        assert_eq!(
            new_note(json!({"content": {"k": "v"}})).unwrap().content,
            "[object Object]"
        );
    }

    #[test]
    fn test_number_coercion_uses_exponent_outside_plain_range() {
        assert_eq!(new_note(json!({"content": 1e21})).unwrap().content, "1e+21");
        assert_eq!(new_note(json!({"content": 1.5e300})).unwrap().content, "1.5e+300");
        assert_eq!(new_note(json!({"content": 1e20})).unwrap().content, "100000000000000000000");
        assert_eq!(new_note(json!({"content": 0.000001})).unwrap().content, "0.000001");
        assert_eq!(new_note(json!({"content": 1.5e-7})).unwrap().content, "1.5e-7");
        assert_eq!(new_note(json!({"content": -2.5e-9})).unwrap().content, "-2.5e-9");
        assert_eq!(new_note(json!({"content": [-0.0, 1]})).unwrap().content, "0,1");
    }

    #[test]
    fn test_create_keeps_valid_colors() {
        assert_eq!(new_note(json!({"content": "a", "color": "#abc"})).unwrap().color.as_str(), "#abc");
        assert_eq!(
            new_note(json!({"content": "a", "color": "#12AbEf"})).unwrap().color.as_str(),
            "#12AbEf"
        );
        assert_eq!(
            new_note(json!({"content": "a", "color": "  #fff  "})).unwrap().color.as_str(),
            "#fff"
        );
    }

    #[test]
    fn test_create_defaults_malformed_colors() {
        for color in [json!("red"), json!("#abcd"), json!(""), json!(123), json!(null), json!({})] {
            let note = new_note(json!({"content": "a", "color": color})).unwrap();
            assert_eq!(note.color.as_str(), "#FDE68A");
        }
    }

    #[test]
    fn test_create_coerces_non_string_color() {
        let note = new_note(json!({"content": "a", "color": ["#abc"]})).unwrap();
        assert_eq!(note.color.as_str(), "#abc");
        let note = new_note(json!({"content": "a", "color": [" #123456 "]})).unwrap();
        assert_eq!(note.color.as_str(), "#123456");
    }

    #[test]
    fn test_patch_requires_a_change() {
        assert_eq!(patch(json!({})), Err(ValidationError::NoChanges));
        // Non-string fields are ignored entirely.
        assert_eq!(
            patch(json!({"content": 5, "color": null})),
            Err(ValidationError::NoChanges)
        );
    }

    #[test]
    fn test_patch_rejects_malformed_color() {
        assert_eq!(
            patch(json!({"color": "blue"})),
            Err(ValidationError::InvalidColor)
        );
        assert_eq!(
            patch(json!({"content": "fine", "color": "#12"})),
            Err(ValidationError::InvalidColor)
        );
    }

    #[test]
    fn test_patch_validates_content() {
        assert_eq!(
            patch(json!({"content": "  "})),
            Err(ValidationError::ContentRequired)
        );
        assert!(matches!(
            patch(json!({"content": "q".repeat(1001)})),
            Err(ValidationError::ContentTooLong { .. })
        ));
    }

    #[test]
    fn test_patch_partial_fields() {
        let changes = patch(json!({"color": " #000 "})).unwrap();
        assert_eq!(changes.content, None);
        assert_eq!(changes.color.unwrap().as_str(), "#000");

        let changes = patch(json!({"content": " new text "})).unwrap();
        assert_eq!(changes.content.as_deref(), Some("new text"));
        assert!(changes.color.is_none());
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
