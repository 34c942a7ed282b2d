//! Server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"text\" or \"json\", got {:?}", other)),
        }
    }
}

/// Server configuration.
///
/// Secrets are allowed to be empty: the server starts with a warning and the
/// requests that need them fail instead.
#[derive(Clone)]
pub struct ServerConfig {
    /// Shared admin password, compared verbatim on login.
    pub admin_password: String,
    /// HMAC key for signing admin tokens.
    pub jwt_secret: String,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Use the first `X-Forwarded-For` hop as the client origin.
    pub trust_forwarded_for: bool,
    /// Maximum note creations per client per window.
    pub create_rate_limit: u32,
    /// Length of the create rate-limit window.
    pub create_rate_window: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_password: String::new(),
            jwt_secret: String::new(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "*".to_string(),
            trust_forwarded_for: false,
            create_rate_limit: 20,
            create_rate_window: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Secrets (missing ones are reported by [`missing_secrets`](Self::missing_secrets)):
    /// - `ADMIN_PASSWORD`: Admin login password
    /// - `JWT_SECRET`: Token signing key
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `TRUST_FORWARDED_FOR`: Rate-limit by `X-Forwarded-For` (default: false)
    /// - `CREATE_RATE_LIMIT`: Creations per window (default: 20)
    /// - `CREATE_RATE_WINDOW_SECS`: Window length in seconds (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let admin_password = lookup("ADMIN_PASSWORD").unwrap_or_default();
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();

        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let trust_forwarded_for = lookup("TRUST_FORWARDED_FOR")
            .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(defaults.trust_forwarded_for);

        let create_rate_limit =
            parse_var(&lookup, "CREATE_RATE_LIMIT")?.unwrap_or(defaults.create_rate_limit);

        let create_rate_window = parse_var::<u64>(&lookup, "CREATE_RATE_WINDOW_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.create_rate_window);

        if create_rate_window.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "CREATE_RATE_WINDOW_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            admin_password,
            jwt_secret,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            trust_forwarded_for,
            create_rate_limit,
            create_rate_window,
        })
    }

    /// Names of secret variables that are unset or empty.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.admin_password.is_empty() {
            missing.push("ADMIN_PASSWORD");
        }
        if self.jwt_secret.is_empty() {
            missing.push("JWT_SECRET");
        }
        missing
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("admin_password", &redacted(&self.admin_password))
            .field("jwt_secret", &redacted(&self.jwt_secret))
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .field("create_rate_limit", &self.create_rate_limit)
            .field("create_rate_window", &self.create_rate_window)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
