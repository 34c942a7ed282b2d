//! Command implementations for the stickynotes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod login;
pub mod update;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("an admin token is required; run `stickynotes login` and pass --token")]
    TokenRequired,
}

/// Connection settings shared by every command.
pub struct Context {
    pub client: reqwest::Client,
    pub base_url: String,
    pub human: bool,
    pub has_token: bool,
}

impl Context {
    /// Build the context, attaching the Bearer token to every request if given.
    pub fn new(base_url: &str, token: Option<&str>, human: bool) -> Result<Self> {
        let token = token.filter(|t| !t.is_empty());
        Ok(Self {
            client: build_client(token)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            human,
            has_token: token.is_some(),
        })
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single note. The ID is percent-encoded as one path segment.
    pub fn note_url(&self, id: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url("/api/notes"))?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Invalid server URL: {}", self.base_url))?
            .push(id);
        Ok(url)
    }

    /// Fail early for admin commands run without a token.
    pub fn require_token(&self) -> Result<(), CliError> {
        if self.has_token {
            Ok(())
        } else {
            Err(CliError::TokenRequired)
        }
    }
}

/// Build an HTTP client, optionally configured with a Bearer token.
pub fn build_client(token: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(token) = token {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| anyhow::anyhow!("Invalid token value: {}", e))?;
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    Ok(builder.build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Send a request and decode the JSON response, turning API errors into
/// [`CliError::Server`].
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract the message from an `{"error": {"code", "message"}}` body,
/// falling back to the raw text.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let error = json.get("error");
    error
        .and_then(|e| e.get("message"))
        .or(error)
        .and_then(|v| v.as_str())
        .unwrap_or(body)
        .to_string()
}

/// Acknowledgement body returned by health and delete.
#[derive(Debug, Deserialize, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// A note as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct NoteView {
    pub id: String,
    pub content: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl NoteView {
    /// Print the note as an indented block.
    pub fn print_block(&self) {
        println!("  {} {}", "ID:".cyan(), self.id.bold());
        println!("  {} {}", "Color:".cyan(), self.color);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created_at));
        for line in self.content.lines() {
            println!("    {}", line);
        }
    }
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
