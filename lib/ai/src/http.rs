//! HTTP-backed providers.
//!
//! [`HttpBackend`] owns the transport: one POST per call, bounded by a
//! timeout, with every failure mapped to an [`LlmError`]. The request and
//! response shapes come from a [`WireFormat`], one per provider.

use crate::backend::{LlmBackend, LlmProvider, LlmRequest, LlmResponse, ProviderConfig};
use crate::error::{LlmError, ProviderFailure};
use crate::gemini::GeminiWire;
use crate::ollama::OllamaWire;
use crate::openai::OpenAiWire;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;

/// Provider-specific request and response shaping.
pub trait WireFormat: Send + Sync {
    /// Builds the JSON body for a single-turn generation.
    fn build_body(&self, model: &str, request: &LlmRequest) -> JsonValue;

    /// Attaches the credential to an outgoing request.
    fn authorize(&self, builder: RequestBuilder, api_key: &str) -> RequestBuilder;

    /// Pulls the generated text out of a success envelope.
    fn extract_content(&self, payload: &JsonValue) -> Option<String>;
}

/// An [`LlmBackend`] that talks JSON over HTTP.
pub struct HttpBackend<W> {
    config: ProviderConfig,
    wire: W,
    client: reqwest::Client,
}

impl<W: WireFormat> HttpBackend<W> {
    /// Creates a backend sharing `client`'s connection pool.
    #[must_use]
    pub fn new(config: ProviderConfig, wire: W, client: reqwest::Client) -> Self {
        Self {
            config,
            wire,
            client,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn call(&self, request: &LlmRequest) -> Result<String, LlmError> {
        let api_key = self.config.credential();
        if self.config.requires_credential() && api_key.is_none() {
            return Err(LlmError::MissingCredential);
        }

        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let body = self.wire.build_body(&self.config.model, request);

        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .timeout(timeout)
            .json(&body);
        if let Some(key) = api_key {
            builder = self.wire.authorize(builder, key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        tracing::debug!(
            provider = %self.config.provider,
            status = %status,
            "Provider responded"
        );

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        if !status.is_success() {
            return Err(LlmError::ApiStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: JsonValue =
            serde_json::from_str(&text).map_err(|e| LlmError::ResponseParseFailed {
                reason: e.to_string(),
            })?;

        match self.wire.extract_content(&payload) {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(LlmError::UnexpectedResponse {
                payload: payload.to_string(),
            }),
        }
    }
}

#[async_trait]
impl<W: WireFormat> LlmBackend for HttpBackend<W> {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderFailure> {
        let content = self
            .call(request)
            .await
            .map_err(|error| ProviderFailure::new(self.config.provider, error))?;

        Ok(LlmResponse {
            content,
            provider: self.config.provider,
            model: self.config.model.clone(),
        })
    }

    fn provider(&self) -> LlmProvider {
        self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn has_credential(&self) -> bool {
        self.config.has_credential()
    }
}

// The URL may carry a credential (Gemini's `?key=`), so it is stripped
// before the error is rendered.
fn transport_error(error: reqwest::Error, timeout: Duration) -> LlmError {
    let error = error.without_url();
    if error.is_timeout() {
        LlmError::Timeout {
            after_secs: timeout.as_secs(),
        }
    } else if error.is_decode() {
        LlmError::ResponseParseFailed {
            reason: error.to_string(),
        }
    } else {
        LlmError::RequestFailed {
            reason: error.to_string(),
        }
    }
}

/// Builds the backend matching `config.provider`.
#[must_use]
pub fn backend_for(config: ProviderConfig, client: reqwest::Client) -> Arc<dyn LlmBackend> {
    match config.provider {
        LlmProvider::Gemini => Arc::new(HttpBackend::new(config, GeminiWire, client)),
        LlmProvider::OpenAi => Arc::new(HttpBackend::new(config, OpenAiWire, client)),
        LlmProvider::Ollama => Arc::new(HttpBackend::new(config, OllamaWire, client)),
    }
}
