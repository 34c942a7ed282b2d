//! Application state shared across handlers.
//!
//! Every process-wide service lives here and is built once at startup: the
//! note service (and through it the store connection), access control, and
//! the create rate limiter. None of them needs teardown; the limiter's
//! counters are memory-only and the store connection lives as long as the
//! process.

use std::sync::Arc;

use stickynotes_store::{NoteService, NoteStore};

use crate::auth::AccessControl;
use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Note operations over the durable store.
    notes: NoteService,
    /// Admin login and token verification.
    access: Arc<AccessControl>,
    /// Rate limiter for public note creation.
    create_limiter: Arc<RateLimiter>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn NoteStore>, config: ServerConfig) -> Self {
        let access = AccessControl::new(config.admin_password.clone(), config.jwt_secret.clone());
        let create_limiter = RateLimiter::new(config.create_rate_limit, config.create_rate_window);

        Self {
            notes: NoteService::new(store),
            access: Arc::new(access),
            create_limiter: Arc::new(create_limiter),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the note service.
    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    /// Get a reference to access control.
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Get a reference to the create rate limiter.
    pub fn create_limiter(&self) -> &RateLimiter {
        &self.create_limiter
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
