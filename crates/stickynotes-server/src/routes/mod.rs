//! Route definitions for the HTTP API.

pub mod admin;
pub mod health;
pub mod notes;

use axum::Router;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of acknowledgement responses: `{"ok": true}`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(notes::routes())
        .merge(admin::routes())
        .fallback(route_not_found)
        .with_state(state)
}

/// Unknown paths get the same JSON error body as every other failure.
async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
