//! Health check endpoint.

use axum::{Json, Router, routing::get};

use super::OkResponse;
use crate::state::AppState;

/// GET /api/health - Health check endpoint.
async fn health_check() -> Json<OkResponse> {
    Json(OkResponse::ok())
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        assert!(response.ok);
    }
}
