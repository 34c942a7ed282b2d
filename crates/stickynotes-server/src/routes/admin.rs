//! Admin login route.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stickynotes_core::is_truthy;

use crate::auth::AuthError;
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/admin/login
///
/// # Response
///
/// - 200 OK: `{ "token": "<jwt>" }`
/// - 400 Bad Request: password missing or empty
/// - 401 Unauthorized: wrong password
async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = match request.password {
        Some(Value::String(password)) if !password.is_empty() => {
            state.access().login(&password)
        }
        // A non-string password can never equal the configured secret.
        Some(ref other) if is_truthy(other) => Err(AuthError::InvalidCredentials),
        _ => Err(AuthError::PasswordRequired),
    };

    let token = token.inspect_err(|e| {
        tracing::info!(reason = %e, "Admin login rejected");
    })?;

    tracing::info!("Admin logged in");
    Ok(Json(LoginResponse { token }))
}

/// Build admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}
