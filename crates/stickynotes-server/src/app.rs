//! Application assembly: routes plus the middleware stack.

use axum::{Router, extract::DefaultBodyLimit};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ConfigError;
use crate::middleware::request_id::{propagate_request_id_layer, set_request_id_layer};
use crate::middleware::security_headers::with_security_headers;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Build the full application: routes, body limit, request IDs, CORS, security
/// headers and request tracing.
///
/// Fails only when `CORS_ALLOWED_ORIGINS` holds an origin that is not a valid
/// header value.
pub fn build_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.config().cors_allowed_origins)?;

    let app = routes::build_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(cors);

    Ok(with_security_headers(app).layer(TraceLayer::new_for_http()))
}

/// Build CORS layer from configuration.
///
/// `*` mirrors the caller's origin back; otherwise only the listed origins
/// are allowed. Credentials are never allowed.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let allow_origin = if allowed_origins.trim() == "*" {
        AllowOrigin::mirror_request()
    } else {
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>().map_err(|e| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("{:?}: {}", s, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
