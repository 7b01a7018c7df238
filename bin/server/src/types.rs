//! Request and response bodies for the HTTP routes.

use blogsmith_ai::{LlmProvider, SystemStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /ai-blog`.
#[derive(Debug, Clone, Deserialize)]
pub struct AiBlogRequest {
    pub prompt: String,
}

/// Local model output, or `"Error: <message>"`.
#[derive(Debug, Clone, Serialize)]
pub struct AiBlogResponse {
    pub result: String,
}

/// Body of `POST /blog-research`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogResearchRequest {
    pub query: String,
    /// Preferred provider. Logged, not used for routing.
    #[serde(default)]
    pub provider: Option<String>,
    /// Format tag; unknown or missing selects the comprehensive layout.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BlogResearchResponse {
    Success(BlogResearchSuccess),
    Error(ErrorBody),
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogResearchSuccess {
    pub title: String,
    pub content: String,
    pub query: String,
    pub provider: LlmProvider,
    pub system_status: StatusSummary,
}

/// Condensed status echoed with a research result.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub internet_available: bool,
    pub gemini_configured: bool,
    pub openai_configured: bool,
    pub available_providers: Vec<&'static str>,
}

impl From<&SystemStatus> for StatusSummary {
    fn from(status: &SystemStatus) -> Self {
        Self {
            internet_available: status.internet_available,
            gemini_configured: status.is_configured(LlmProvider::Gemini),
            openai_configured: status.is_configured(LlmProvider::OpenAi),
            available_providers: status.available_providers(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Error,
}

/// Body of `GET /test-gemini`. Optional fields are omitted when unset.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiTestResponse {
    pub status: ProbeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_preview: Option<String>,
}

impl GeminiTestResponse {
    #[must_use]
    pub fn success(generated_text: String, model: String) -> Self {
        Self {
            status: ProbeStatus::Success,
            message: "Gemini API is working correctly!".to_string(),
            generated_text: Some(generated_text),
            model: Some(model),
            details: None,
            api_key_preview: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            message: message.into(),
            generated_text: None,
            model: None,
            details: None,
            api_key_preview: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_key_preview(mut self, preview: Option<String>) -> Self {
        self.api_key_preview = preview;
        self
    }
}

/// Body of `GET /test-system`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub internet_available: bool,
    pub gemini_configured: bool,
    pub openai_configured: bool,
    pub gemini_key_preview: Option<String>,
    pub openai_key_preview: Option<String>,
    pub available_providers: Vec<&'static str>,
    pub system_ready: bool,
    pub local_daemon_running: bool,
}

impl From<&SystemStatus> for SystemReport {
    fn from(status: &SystemStatus) -> Self {
        Self {
            internet_available: status.internet_available,
            gemini_configured: status.is_configured(LlmProvider::Gemini),
            openai_configured: status.is_configured(LlmProvider::OpenAi),
            gemini_key_preview: status.key_preview(LlmProvider::Gemini),
            openai_key_preview: status.key_preview(LlmProvider::OpenAi),
            available_providers: status.available_providers(),
            system_ready: status.system_ready(),
            local_daemon_running: status.local_daemon_running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_variant_serializes_flat() {
        let body = BlogResearchResponse::Error(ErrorBody {
            error: "nope".to_string(),
        });
        assert_eq!(
            serde_json::to_value(body).expect("serialize"),
            json!({ "error": "nope" })
        );
    }

    #[test]
    fn gemini_test_omits_unset_fields() {
        let body = GeminiTestResponse::error("Gemini API key is not configured");
        assert_eq!(
            serde_json::to_value(body).expect("serialize"),
            json!({ "status": "error", "message": "Gemini API key is not configured" })
        );
    }

    #[test]
    fn research_request_defaults_optional_fields() {
        let request: BlogResearchRequest =
            serde_json::from_value(json!({ "query": "" })).expect("deserialize");
        assert_eq!(request.query, "");
        assert_eq!(request.format, None);
        assert_eq!(request.provider, None);
    }
}
