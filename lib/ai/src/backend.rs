//! LLM backend abstraction.
//!
//! Every provider the relay can talk to is reached through [`LlmBackend`],
//! configured by a [`ProviderConfig`].

use crate::error::ProviderFailure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Providers known to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini generateContent API.
    Gemini,
    /// OpenAI chat completions API.
    OpenAi,
    /// Local Ollama daemon.
    Ollama,
}

impl LlmProvider {
    /// Stable identifier used in JSON responses.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Name used in human-readable error messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
            Self::Ollama => "Ollama",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11435";
pub const OLLAMA_MODEL: &str = "tinyllama";

const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);
const LOCAL_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for one provider.
///
/// Built once at start-up and read-only afterwards. Availability is derived
/// on demand from the credential and a connectivity flag, never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The provider type.
    pub provider: LlmProvider,
    /// Full URL requests are POSTed to.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// API key (if required).
    pub api_key: Option<String>,
    /// Upper bound for a single request.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Gemini with the default endpoint and model.
    #[must_use]
    pub fn gemini(api_key: Option<String>) -> Self {
        Self {
            provider: LlmProvider::Gemini,
            endpoint: GEMINI_ENDPOINT.to_string(),
            model: GEMINI_MODEL.to_string(),
            api_key,
            timeout: REMOTE_TIMEOUT,
        }
    }

    /// OpenAI with the default endpoint and model.
    #[must_use]
    pub fn openai(api_key: Option<String>) -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            endpoint: OPENAI_ENDPOINT.to_string(),
            model: OPENAI_MODEL.to_string(),
            api_key,
            timeout: REMOTE_TIMEOUT,
        }
    }

    /// Ollama reachable at `base_url`.
    #[must_use]
    pub fn ollama(base_url: &str) -> Self {
        Self {
            provider: LlmProvider::Ollama,
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: OLLAMA_MODEL.to_string(),
            api_key: None,
            timeout: LOCAL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the provider needs an API key at all.
    #[must_use]
    pub fn requires_credential(&self) -> bool {
        !matches!(self.provider, LlmProvider::Ollama)
    }

    /// The API key, if one is set and non-empty.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Whether the provider can be attempted. Keyless providers always can.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        !self.requires_credential() || self.credential().is_some()
    }

    /// Whether the provider should be advertised as available.
    #[must_use]
    pub fn is_enabled(&self, connectivity: bool) -> bool {
        self.has_credential() && connectivity
    }

    /// First ten characters of the key followed by `...`.
    #[must_use]
    pub fn key_preview(&self) -> Option<String> {
        self.credential()
            .map(|key| format!("{}...", key.chars().take(10).collect::<String>()))
    }
}

// Keep keys out of debug output.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.key_preview())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    /// The rendered prompt.
    pub prompt: String,
    /// System prompt, for providers with a chat format.
    pub system: Option<String>,
    /// Temperature for sampling.
    pub temperature: Option<f64>,
    /// Top-k sampling cutoff.
    pub top_k: Option<u32>,
    /// Nucleus sampling cutoff.
    pub top_p: Option<f64>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Overrides the provider's configured timeout for this call.
    pub timeout: Option<Duration>,
}

impl LlmRequest {
    /// Creates a new simple request with just a prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            temperature: None,
            top_k: None,
            top_p: None,
            max_tokens: None,
            timeout: None,
        }
    }

    /// Adds a system prompt.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    #[must_use]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the max tokens.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Content returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated content.
    pub content: String,
    /// Provider that generated it.
    pub provider: LlmProvider,
    /// Model that generated it.
    pub model: String,
}

/// Trait for LLM backends.
///
/// Implementations make at most one network call per `generate` and report
/// every failure as a value; nothing here retries.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generates content for the given request.
    ///
    /// # Errors
    ///
    /// Returns the failure tagged with this backend's provider.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderFailure>;

    /// Returns the provider type.
    fn provider(&self) -> LlmProvider;

    /// Returns the model name.
    fn model(&self) -> &str;

    /// Whether this backend can be attempted at all.
    fn has_credential(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder() {
        let request = LlmRequest::new("Write about Rust")
            .with_system("You are a helpful research assistant.")
            .with_temperature(0.7)
            .with_top_k(40)
            .with_top_p(0.95)
            .with_max_tokens(4096);

        assert_eq!(request.prompt, "Write about Rust");
        assert_eq!(
            request.system.as_deref(),
            Some("You are a helpful research assistant.")
        );
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.top_k, Some(40));
        assert_eq!(request.top_p, Some(0.95));
        assert_eq!(request.max_tokens, Some(4096));
        assert_eq!(request.timeout, None);
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = ProviderConfig::gemini(Some(String::new()));
        assert!(!config.has_credential());
        assert_eq!(config.key_preview(), None);
    }

    #[test]
    fn enabled_needs_key_and_connectivity() {
        let config = ProviderConfig::openai(Some("sk-test".to_string()));
        assert!(config.is_enabled(true));
        assert!(!config.is_enabled(false));
        assert!(!ProviderConfig::openai(None).is_enabled(true));
    }

    #[test]
    fn ollama_needs_no_key() {
        let config = ProviderConfig::ollama("http://localhost:11435/");
        assert!(config.has_credential());
        assert_eq!(config.endpoint, "http://localhost:11435/api/generate");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn key_preview_truncates() {
        let config = ProviderConfig::gemini(Some("AIzaSyExampleKey123".to_string()));
        assert_eq!(config.key_preview().as_deref(), Some("AIzaSyExam..."));
    }

    #[test]
    fn debug_output_hides_key() {
        let config = ProviderConfig::openai(Some("sk-secret-value-do-not-log".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("do-not-log"));
    }

    #[test]
    fn provider_serializes_as_id() {
        let json = serde_json::to_string(&LlmProvider::OpenAi).expect("serialize");
        assert_eq!(json, "\"openai\"");
        assert_eq!(LlmProvider::Gemini.to_string(), "gemini");
    }
}
