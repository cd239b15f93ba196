//! HTTP client for the assistant backend.
//!
//! The TUI talks to the backend through the [`AskBackend`] trait so tests
//! can substitute a canned implementation. [`HttpBackend`] is the real one:
//! a single `POST <base-url>/ask` per call, JSON in, JSON out.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};

use super::types::{AskRequest, AskResponse};

/// Errors that can occur while talking to the backend.
///
/// The user only ever sees one collapsed error message (see
/// `core::action`); the variants exist so the log file can tell a refused
/// connection from a bad response body.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Anything that can answer a prompt.
#[async_trait]
pub trait AskBackend: Send + Sync {
    /// Sends one prompt and resolves to the answer text.
    async fn ask(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Backend reached over HTTP at a fixed base URL.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AskBackend for HttpBackend {
    async fn ask(&self, prompt: &str) -> Result<String, ApiError> {
        let body = AskRequest {
            prompt: prompt.to_string(),
        };

        debug!("POST {}/ask ({} prompt bytes)", self.base_url, prompt.len());

        let response = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend returned {}: {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AskResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        debug!("Answer received ({} bytes)", parsed.answer.len());
        Ok(parsed.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/".to_string());
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }

    #[test]
    fn error_display_names_the_status() {
        let err = ApiError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (HTTP 503): overloaded");
    }
}
