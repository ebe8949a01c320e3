//! Client for an Ollama-compatible text-generation server.
//!
//! One-shot, blocking-per-request completion calls against `/api/generate`.
//! No streaming, no retries: a transport failure or non-2xx status surfaces
//! immediately as a [`GenerateError`].

mod client;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::OllamaClient;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Immutable client configuration, constructed once and passed to callers.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the model server, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Fixed wall-clock timeout applied to every call.
    pub timeout: Duration,
}

impl OllamaConfig {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &str = "llama2";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Config with the default model and timeout for the given server.
    ///
    /// Callers that need a different model or timeout fill the fields
    /// directly; resolution of those values from flags, environment, or a
    /// config file belongs to the binary.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_model: Self::DEFAULT_MODEL.to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Sampling temperature applied when the caller sets none.
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    /// Output length cap applied when the caller sets none.
    pub const DEFAULT_MAX_TOKENS: u32 = 2048;

    /// A single-shot request with default sampling parameters.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            temperature: Some(Self::DEFAULT_TEMPERATURE),
            max_tokens: Some(Self::DEFAULT_MAX_TOKENS),
            options: None,
        }
    }
}

/// Response envelope from `/api/generate`.
///
/// Only `response` and `done` are required; servers differ on the rest.
/// Consumed immediately by the caller, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(rename = "response")]
    pub content: String,
    pub done: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Error body some servers return on non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub code: Option<i64>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from a generation call. No retry at this layer: every variant
/// surfaces to the caller on the first failure.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Endpoint unreachable or the call exceeded the configured timeout.
    #[error("model server unreachable: {0}")]
    Connection(#[source] reqwest::Error),

    /// Non-2xx status. `detail` is the server's error message when the body
    /// parses as an error envelope, otherwise the raw body.
    #[error("model server returned status {status}: {detail}")]
    Server { status: u16, detail: String },

    /// 2xx status but the body is not a valid response envelope.
    #[error("failed to decode model response: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Generator trait
// ---------------------------------------------------------------------------

/// Object-safe seam over a text-generation backend.
///
/// The plan pipeline and the HTTP layer depend on this trait rather than on
/// [`OllamaClient`] directly, so tests can substitute a canned generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Issue one completion call with the backend's default model and
    /// sampling parameters.
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, GenerateError>;
}

// Compile-time assertion: TextGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn TextGenerator) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = GenerateRequest::new("llama2", "hello");
        assert_eq!(req.model, "llama2");
        assert!(!req.stream);
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.max_tokens, Some(2048));
        assert!(req.options.is_none());
    }

    #[test]
    fn request_serializes_without_unset_fields() {
        let req = GenerateRequest {
            temperature: None,
            max_tokens: None,
            ..GenerateRequest::new("m", "p")
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("options").is_none());
        assert_eq!(json["stream"], serde_json::json!(false));
    }

    #[test]
    fn response_requires_only_response_and_done() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"response": "text", "done": true}"#).unwrap();
        assert_eq!(resp.content, "text");
        assert!(resp.done);
        assert_eq!(resp.model, "");
        assert!(resp.created_at.is_none());
    }

    #[test]
    fn response_rejects_missing_content() {
        let result = serde_json::from_str::<GenerateResponse>(r#"{"done": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn config_new_uses_defaults() {
        let cfg = OllamaConfig::new("http://localhost:9999");
        assert_eq!(cfg.base_url, "http://localhost:9999");
        assert_eq!(cfg.default_model, "llama2");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }
}
