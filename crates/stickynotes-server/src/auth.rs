//! Access control: admin login and bearer token verification.
//!
//! There is a single shared admin. Logging in with the configured password
//! yields an HS256 JWT carrying `role: "admin"` that expires after seven days.
//! Tokens are verified statelessly (signature and expiry only); there is no
//! session table and no revocation.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Role claim carried by admin tokens.
pub const ADMIN_ROLE: &str = "admin";

/// Lifetime of an issued admin token.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Role asserted by the token.
    pub role: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration time (unix timestamp).
    pub exp: i64,
}

/// Reasons a login or token check fails.
///
/// The HTTP layer collapses all token-related variants into one
/// indistinguishable 401; the variants exist for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("password required")]
    PasswordRequired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token signing key is not configured")]
    SigningKeyMissing,

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token role {0:?} is not admin")]
    WrongRole(String),
}

/// A verified admin credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies admin tokens.
#[derive(Clone)]
pub struct AccessControl {
    admin_password: String,
    signing_key: String,
    token_ttl: Duration,
}

impl AccessControl {
    /// Create access control with the standard seven-day token lifetime.
    pub fn new(admin_password: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            admin_password: admin_password.into(),
            signing_key: signing_key.into(),
            token_ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Lifetime of tokens issued by [`login`](Self::login).
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Check the admin password and issue a token.
    ///
    /// The password is compared verbatim. An unconfigured admin password never
    /// matches, because an empty password is rejected up front.
    pub fn login(&self, password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::PasswordRequired);
        }
        if self.admin_password.is_empty() || password != self.admin_password {
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_token(Utc::now())
    }

    /// Sign an admin token as if issued at `now`.
    pub fn issue_token(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        self.sign(&Claims {
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        })
    }

    /// Sign arbitrary claims with the server key.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        if self.signing_key.is_empty() {
            return Err(AuthError::SigningKeyMissing);
        }
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.signing_key.as_bytes()),
        )
        .map_err(AuthError::Signing)
    }

    /// Verify a token's signature, expiry and role.
    pub fn authorize(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        if self.signing_key.is_empty() {
            return Err(AuthError::SigningKeyMissing);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second its `exp` passes.
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.signing_key.as_bytes()),
            &validation,
        )?;
        let claims = token_data.claims;

        if claims.role != ADMIN_ROLE {
            return Err(AuthError::WrongRole(claims.role));
        }

        Ok(AdminIdentity {
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_default(),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessControl")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers)
            .and_then(|token| state.access().authorize(token))
            .map_err(|e| {
                // Every cause produces the same response; only the log says why.
                tracing::debug!(reason = %e, "Admin authorization rejected");
                ApiError::Unauthorized
            })
    }
}
