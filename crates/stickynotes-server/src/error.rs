//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use stickynotes_store::StoreError;

use crate::auth::AuthError;
use crate::rate_limit::Quota;

/// Message for every authentication or authorization failure.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

/// Message for every server-side failure.
const INTERNAL_MESSAGE: &str = "internal server error";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired credential, or wrong password (401).
    ///
    /// Carries no detail so that callers cannot tell the causes apart.
    #[error("unauthorized")]
    Unauthorized,

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body over the size limit (413).
    #[error("payload too large")]
    PayloadTooLarge,

    /// Create rate limit exceeded (429).
    #[error("rate limited")]
    RateLimited(Quota),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
            StatusCode::TOO_MANY_REQUESTS => "RATE_LIMITED",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) if !e.is_client_error() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(StoreError::NoteNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the client. Server-side failures are reduced to a
    /// generic message; the detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::PayloadTooLarge => "request body too large".to_string(),
            Self::RateLimited(_) => "too many requests, please try again later".to_string(),
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            Self::Store(StoreError::Validation(e)) => e.to_string(),
            Self::Store(StoreError::NoteNotFound(_)) => "note not found".to_string(),
            Self::Store(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PasswordRequired => Self::BadRequest(err.to_string()),
            AuthError::SigningKeyMissing | AuthError::Signing(_) => Self::Internal(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::WrongRole(_) => Self::Unauthorized,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else if matches!(&self, Self::Store(e) if e.is_client_error()) {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };

        match self {
            Self::RateLimited(quota) => (status, quota, Json(body)).into_response(),
            _ => (status, Json(body)).into_response(),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
