//! Fixed-window rate limiting for public note creation.
//!
//! Counters are keyed by client origin and live only in process memory, so a
//! restart clears them. This is an abuse guard, not an accounting mechanism.

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, header, request::Parts},
    response::{IntoResponseParts, ResponseParts},
};
use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::extract::client_origin;
use crate::state::AppState;

/// Window counts above this size trigger a sweep of expired entries.
const PRUNE_THRESHOLD: usize = 10_000;

static RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
static RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
static RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Maximum requests per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Time until the current window ends.
    pub reset_after: Duration,
    /// Whether this request fits in the window.
    pub allowed: bool,
}

impl Quota {
    fn reset_secs(&self) -> u64 {
        // Round up so clients never retry a moment too early.
        self.reset_after.as_millis().div_ceil(1000) as u64
    }
}

impl IntoResponseParts for Quota {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let headers = res.headers_mut();
        headers.insert(RATELIMIT_LIMIT.clone(), HeaderValue::from(self.limit));
        headers.insert(RATELIMIT_REMAINING.clone(), HeaderValue::from(self.remaining));
        headers.insert(RATELIMIT_RESET.clone(), HeaderValue::from(self.reset_secs()));
        if !self.allowed {
            headers.insert(header::RETRY_AFTER, HeaderValue::from(self.reset_secs()));
        }
        Ok(res)
    }
}

/// Per-key fixed-window counter.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Allow `limit` hits per `window` for each key.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` now.
    pub async fn check(&self, key: &str) -> Quota {
        self.check_at(key, Instant::now()).await
    }

    /// Record a hit for `key` at the given instant.
    ///
    /// Rejected hits still count toward the window.
    pub async fn check_at(&self, key: &str, now: Instant) -> Quota {
        let mut windows = self.windows.lock().await;

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        entry.count = entry.count.saturating_add(1);

        Quota {
            limit: self.limit,
            remaining: self.limit.saturating_sub(entry.count),
            reset_after: self
                .window
                .saturating_sub(now.saturating_duration_since(entry.started)),
            allowed: entry.count <= self.limit,
        }
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Extractor that consumes one unit of the caller's create quota.
///
/// Runs before the body is read, so a limited client is turned away before
/// any validation happens.
#[derive(Debug, Clone, Copy)]
pub struct CreateQuota(pub Quota);

impl FromRequestParts<AppState> for CreateQuota {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let origin = client_origin(parts, state.config().trust_forwarded_for);
        let quota = state.create_limiter().check(&origin).await;

        if !quota.allowed {
            tracing::warn!(origin = %origin, "Create rate limit exceeded");
            return Err(ApiError::RateLimited(quota));
        }
        Ok(Self(quota))
    }
}
