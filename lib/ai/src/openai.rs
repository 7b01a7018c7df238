//! OpenAI chat completions wire format.

use crate::backend::LlmRequest;
use crate::http::WireFormat;
use reqwest::RequestBuilder;
use serde_json::{Value as JsonValue, json};

/// Request/response shaping for OpenAI-style chat completions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiWire;

impl WireFormat for OpenAiWire {
    fn build_body(&self, model: &str, request: &LlmRequest) -> JsonValue {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let mut body = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    fn authorize(&self, builder: RequestBuilder, api_key: &str) -> RequestBuilder {
        builder.bearer_auth(api_key)
    }

    fn extract_content(&self, payload: &JsonValue) -> Option<String> {
        payload
            .pointer("/choices/0/message/content")
            .and_then(JsonValue::as_str)
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmBackend, LlmProvider, ProviderConfig};
    use crate::http::HttpBackend;
    use mockito::Matcher;

    #[test]
    fn system_prompt_comes_first() {
        let request = LlmRequest::new("Explain TCP")
            .with_system("Be brief.")
            .with_temperature(0.7)
            .with_max_tokens(4096);
        let body = OpenAiWire.build_body("gpt-3.5-turbo", &request);

        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "Be brief." },
                    { "role": "user", "content": "Explain TCP" }
                ],
                "temperature": 0.7,
                "max_tokens": 4096
            })
        );
    }

    #[test]
    fn no_sampling_fields_when_unset() {
        let body = OpenAiWire.build_body("gpt-3.5-turbo", &LlmRequest::new("hi"));
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({ "model": "gpt-4o-mini" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Packets."}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let config = ProviderConfig::openai(Some("sk-test".to_string()))
            .with_endpoint(format!("{}/v1/chat/completions", server.url()))
            .with_model("gpt-4o-mini");
        let backend = HttpBackend::new(config, OpenAiWire, reqwest::Client::new());

        let response = backend
            .generate(&LlmRequest::new("Explain TCP"))
            .await
            .expect("openai should succeed");

        assert_eq!(response.content, "Packets.");
        assert_eq!(response.provider, LlmProvider::OpenAi);
        assert_eq!(backend.model(), "gpt-4o-mini");
        mock.assert_async().await;
    }
}
