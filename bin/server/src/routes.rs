//! HTTP routes.
//!
//! Every handler answers 200 with a JSON body; logical failures travel in
//! the body (`error`, `status: "error"` or an `Error:` prefixed `result`).

use crate::state::AppState;
use crate::types::{
    AiBlogRequest, AiBlogResponse, BlogResearchRequest, BlogResearchResponse,
    BlogResearchSuccess, ErrorBody, GeminiTestResponse, StatusSummary, SystemReport,
};
use axum::{
    Json, Router,
    extract::{Request, State},
    routing::{get, post},
};
use blogsmith_ai::{
    BlogFormat, GenerationError, LlmError, LlmProvider, LlmRequest, render_prompt, research_title,
};
use blogsmith_core::RequestId;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const GEMINI_PROBE_PROMPT: &str = "Hello, please respond with 'Gemini API is working correctly!'";
const GEMINI_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

const RESEARCH_SYSTEM_PROMPT: &str = "You are a helpful research assistant. Provide comprehensive, factual information in markdown format.";

const NO_KEYS_MESSAGE: &str = "No AI API keys configured. Please configure Gemini or OpenAI API key to use AI blog generation.";

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ai-blog", post(ai_blog))
        .route("/test-gemini", get(test_gemini))
        .route("/blog-research", post(blog_research))
        .route("/test-system", get(test_system))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    request_id = %RequestId::new(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Forwards a raw prompt to the local model daemon.
pub async fn ai_blog(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AiBlogRequest>,
) -> Json<AiBlogResponse> {
    let result = match state.local.generate(&LlmRequest::new(body.prompt)).await {
        Ok(response) => response.content,
        Err(failure) => {
            warn!(error = %failure, "Local generation failed");
            format!("Error: {failure}")
        }
    };
    Json(AiBlogResponse { result })
}

/// Sends a tiny prompt to Gemini and reports what came back.
pub async fn test_gemini(State(state): State<Arc<AppState>>) -> Json<GeminiTestResponse> {
    if !state.gemini.has_credential() {
        return Json(GeminiTestResponse::error("Gemini API key is not configured"));
    }
    if !state.internet_available() {
        return Json(GeminiTestResponse::error(
            "Internet connection is not available",
        ));
    }

    let request = LlmRequest::new(GEMINI_PROBE_PROMPT)
        .with_temperature(0.1)
        .with_max_tokens(100)
        .with_timeout(GEMINI_PROBE_TIMEOUT);

    let response = match state.gemini.generate(&request).await {
        Ok(response) => {
            info!(model = %response.model, "Gemini self-test passed");
            GeminiTestResponse::success(response.content, response.model)
        }
        Err(failure) => {
            warn!(error = %failure, "Gemini self-test failed");
            match &failure.error {
                LlmError::ApiStatus { status, body } => {
                    GeminiTestResponse::error(format!("Gemini API returned status {status}"))
                        .with_details(body.clone())
                        .with_key_preview(state.gemini_config.key_preview())
                }
                LlmError::UnexpectedResponse { payload } => {
                    GeminiTestResponse::error("Gemini returned unexpected response format")
                        .with_details(payload.clone())
                }
                _ => GeminiTestResponse::error(format!("Error testing Gemini: {failure}"))
                    .with_details(failure.error.to_string()),
            }
        }
    };
    Json(response)
}

/// Renders the blog prompt and runs the fallback chain.
pub async fn blog_research(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BlogResearchRequest>,
) -> Json<BlogResearchResponse> {
    let format = BlogFormat::from_tag(body.format.as_deref());
    info!(
        query = %body.query,
        format = format.tag(),
        preferred_provider = body.provider.as_deref(),
        "Blog research requested"
    );

    let request = LlmRequest::new(render_prompt(&body.query, format))
        .with_system(RESEARCH_SYSTEM_PROMPT)
        .with_temperature(0.7)
        .with_top_k(40)
        .with_top_p(0.95)
        .with_max_tokens(4096);

    let response = match state.chain.generate(&request).await {
        Ok(generation) => {
            let status = match generation.provider {
                LlmProvider::Ollama => state.status.current_status(),
                LlmProvider::Gemini | LlmProvider::OpenAi => {
                    state.status.confirmed_online_status()
                }
            };
            info!(
                generation_id = %generation.id,
                provider = %generation.provider,
                latency_ms = generation.latency_ms,
                "Blog research completed"
            );
            BlogResearchResponse::Success(BlogResearchSuccess {
                title: research_title(&body.query),
                content: generation.content,
                query: body.query,
                provider: generation.provider,
                system_status: StatusSummary::from(&status),
            })
        }
        Err(GenerationError::NoProvidersConfigured) => BlogResearchResponse::Error(ErrorBody {
            error: NO_KEYS_MESSAGE.to_string(),
        }),
        Err(err @ GenerationError::AllProvidersFailed { .. }) => {
            BlogResearchResponse::Error(ErrorBody {
                error: format!("All AI providers failed. Errors: {}", err.summary()),
            })
        }
    };
    Json(response)
}

/// Reports the start-up status snapshot.
pub async fn test_system(State(state): State<Arc<AppState>>) -> Json<SystemReport> {
    Json(SystemReport::from(&state.status.current_status()))
}
