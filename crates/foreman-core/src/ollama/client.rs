//! reqwest-backed implementation of [`TextGenerator`].

use async_trait::async_trait;
use tracing::debug;

use super::{
    ErrorResponse, GenerateError, GenerateRequest, GenerateResponse, OllamaConfig, TextGenerator,
};

/// Client for an Ollama-compatible generation endpoint.
///
/// Holds an immutable config and a connection-pooling HTTP client with the
/// configured timeout baked in. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    http: reqwest::Client,
}

impl OllamaClient {
    /// Build a client from a config.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (e.g. TLS backend initialization failure).
    pub fn new(config: OllamaConfig) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerateError::Connection)?;
        Ok(Self { config, http })
    }

    /// The configured default model.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Issue one completion call with explicit request parameters.
    ///
    /// A blank model name falls back to the configured default. The prompt
    /// must be non-empty.
    pub async fn generate_with_options(
        &self,
        mut req: GenerateRequest,
    ) -> Result<GenerateResponse, GenerateError> {
        if req.prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        if req.model.is_empty() {
            req.model = self.config.default_model.clone();
        }

        let url = format!("{}/api/generate", self.config.base_url);
        debug!(url = %url, model = %req.model, "sending generation request");

        let response = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(GenerateError::Connection)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(GenerateError::Connection)?;

        if !status.is_success() {
            // Prefer the server's structured error message when present.
            let detail = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(err) => err.error,
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            return Err(GenerateError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let envelope: GenerateResponse =
            serde_json::from_slice(&body).map_err(|e| GenerateError::Decode(e.to_string()))?;

        debug!(
            model = %envelope.model,
            done = envelope.done,
            chars = envelope.content.len(),
            "generation response received"
        );
        Ok(envelope)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, GenerateError> {
        self.generate_with_options(GenerateRequest::new(
            self.config.default_model.clone(),
            prompt,
        ))
        .await
    }
}
