//! Ollama `/api/generate` wire format. Non-streaming, no credential.

use crate::backend::LlmRequest;
use crate::http::WireFormat;
use reqwest::RequestBuilder;
use serde_json::{Value as JsonValue, json};

/// Request/response shaping for a local Ollama daemon.
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaWire;

impl WireFormat for OllamaWire {
    fn build_body(&self, model: &str, request: &LlmRequest) -> JsonValue {
        let mut body = json!({
            "model": model,
            "prompt": request.prompt,
            "stream": false,
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        body
    }

    fn authorize(&self, builder: RequestBuilder, _api_key: &str) -> RequestBuilder {
        builder
    }

    fn extract_content(&self, payload: &JsonValue) -> Option<String> {
        payload
            .get("response")
            .and_then(JsonValue::as_str)
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ProviderConfig;
    use crate::error::LlmError;
    use crate::http::backend_for;
    use mockito::Matcher;

    #[tokio::test]
    async fn forwards_prompt_without_streaming() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(json!({
                "model": "tinyllama",
                "prompt": "Write a haiku",
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"tinyllama","response":"Quiet pond.","done":true}"#)
            .create_async()
            .await;

        let response = backend_for(ProviderConfig::ollama(&server.url()), reqwest::Client::new())
            .generate(&LlmRequest::new("Write a haiku"))
            .await
            .expect("ollama should succeed");

        assert_eq!(response.content, "Quiet pond.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_response_field_is_unexpected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"model 'tinyllama' not found"}"#)
            .create_async()
            .await;

        let failure = backend_for(ProviderConfig::ollama(&server.url()), reqwest::Client::new())
            .generate(&LlmRequest::new("Write a haiku"))
            .await
            .unwrap_err();

        assert!(matches!(failure.error, LlmError::UnexpectedResponse { .. }));
        assert!(failure.to_string().contains("model 'tinyllama' not found"));
    }
}
