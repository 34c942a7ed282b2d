//! Note routes.
//!
//! - GET /api/notes - List all notes, newest first (public)
//! - POST /api/notes - Create a note (public, rate-limited)
//! - PUT /api/notes/{id} - Partially update a note (admin)
//! - DELETE /api/notes/{id} - Delete a note (admin)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use stickynotes_core::{NewNoteInput, Note, NoteId, NotePatchInput};

use super::OkResponse;
use crate::auth::AdminIdentity;
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::rate_limit::{CreateQuota, Quota};
use crate::state::AppState;

/// GET /api/notes - List every note.
///
/// # Response
///
/// - 200 OK: `[{ "id", "content", "color", "created_at" }, ...]`
async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<Note>>> {
    let notes = state.notes().list().await?;

    tracing::debug!(count = notes.len(), "Listed notes");
    Ok(Json(notes))
}

/// POST /api/notes - Create a note.
///
/// The quota extractor runs first, so a limited client gets 429 before its
/// body is even parsed.
///
/// # Request
///
/// Body: `{ "content": "...", "color": "#RRGGBB" }` (color optional)
///
/// # Response
///
/// - 201 Created: the stored note
/// - 400 Bad Request: content missing, blank or too long
/// - 429 Too Many Requests: create limit exceeded
async fn create_note(
    State(state): State<AppState>,
    CreateQuota(quota): CreateQuota,
    JsonBody(input): JsonBody<NewNoteInput>,
) -> ApiResult<(StatusCode, Quota, Json<Note>)> {
    let note = state.notes().create(&input).await?;
    Ok((StatusCode::CREATED, quota, Json(note)))
}

/// PUT /api/notes/{id} - Update content and/or color.
///
/// # Response
///
/// - 200 OK: the full note after the update
/// - 400 Bad Request: invalid field, or nothing to change
/// - 401 Unauthorized: missing or invalid admin token
/// - 404 Not Found: no note with this ID
async fn update_note(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<NotePatchInput>,
) -> ApiResult<Json<Note>> {
    let note = state.notes().update(&NoteId::from(id), &patch).await?;
    Ok(Json(note))
}

/// DELETE /api/notes/{id} - Delete a note.
///
/// # Response
///
/// - 200 OK: `{ "ok": true }`
/// - 401 Unauthorized: missing or invalid admin token
/// - 404 Not Found: no note with this ID
async fn delete_note(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    state.notes().delete(&NoteId::from(id)).await?;
    Ok(Json(OkResponse::ok()))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", put(update_note).delete(delete_note))
}
