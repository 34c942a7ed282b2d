//! stickynotes-server: HTTP API server for the sticky notes service
//!
//! This crate provides:
//! - REST API endpoints for listing, creating, updating and deleting notes
//! - Admin login issuing signed bearer tokens
//! - Per-client rate limiting of public note creation
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling and browser security headers
//! - Request ID generation
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stickynotes_server::{AppState, ServerConfig, build_app};
//! use stickynotes_store::MemoryStore;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::default());
//! let app = build_app(state)?;
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::build_app;
pub use auth::{AccessControl, AdminIdentity, AuthError, Claims};
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use rate_limit::{Quota, RateLimiter};
pub use state::AppState;

// Re-export dependent crates
pub use stickynotes_core;
pub use stickynotes_store;
