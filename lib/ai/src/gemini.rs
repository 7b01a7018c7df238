//! Gemini generateContent wire format.
//!
//! The key travels as the `key` query parameter. Gemini has no system role
//! in this request shape, so `LlmRequest::system` is not sent.

use crate::backend::LlmRequest;
use crate::http::WireFormat;
use reqwest::RequestBuilder;
use serde_json::{Map, Value as JsonValue, json};

/// Request/response shaping for Gemini.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiWire;

impl WireFormat for GeminiWire {
    fn build_body(&self, _model: &str, request: &LlmRequest) -> JsonValue {
        let mut generation_config = Map::new();
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(top_k) = request.top_k {
            generation_config.insert("topK".to_string(), json!(top_k));
        }
        if let Some(top_p) = request.top_p {
            generation_config.insert("topP".to_string(), json!(top_p));
        }
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }

        json!({
            "contents": [{
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": generation_config,
        })
    }

    fn authorize(&self, builder: RequestBuilder, api_key: &str) -> RequestBuilder {
        builder.query(&[("key", api_key)])
    }

    fn extract_content(&self, payload: &JsonValue) -> Option<String> {
        payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(JsonValue::as_str)
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmProvider, ProviderConfig};
    use crate::http::backend_for;
    use mockito::Matcher;

    #[test]
    fn body_only_carries_set_options() {
        let request = LlmRequest::new("Hello")
            .with_temperature(0.1)
            .with_max_tokens(100);
        let body = GeminiWire.build_body("gemini-1.5-flash-latest", &request);

        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "Hello" }] }],
                "generationConfig": { "temperature": 0.1, "maxOutputTokens": 100 }
            })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "first" }, { "text": "second" }] } }]
        });
        assert_eq!(GeminiWire.extract_content(&payload).as_deref(), Some("first"));
        assert_eq!(GeminiWire.extract_content(&json!({ "candidates": [] })), None);
    }

    #[tokio::test]
    async fn sends_key_as_query_parameter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash-latest:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "AIza-test".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "Write about tides" }] }],
                "generationConfig": { "temperature": 0.7, "topK": 40, "topP": 0.95, "maxOutputTokens": 4096 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Tides rise."}]}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let config = ProviderConfig::gemini(Some("AIza-test".to_string())).with_endpoint(format!(
            "{}/v1beta/models/gemini-1.5-flash-latest:generateContent",
            server.url()
        ));
        let request = LlmRequest::new("Write about tides")
            .with_temperature(0.7)
            .with_top_k(40)
            .with_top_p(0.95)
            .with_max_tokens(4096);

        let response = backend_for(config, reqwest::Client::new())
            .generate(&request)
            .await
            .expect("gemini should succeed");

        assert_eq!(response.content, "Tides rise.");
        assert_eq!(response.provider, LlmProvider::Gemini);
        assert_eq!(response.model, "gemini-1.5-flash-latest");
        mock.assert_async().await;
    }
}
