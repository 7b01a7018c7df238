//! AI primitives for blogsmith.
//!
//! - **Prompts**: one Markdown outline per [`BlogFormat`]
//! - **Backends**: Gemini, OpenAI and Ollama behind [`LlmBackend`]
//! - **Fallback**: [`FallbackChain`] tries backends in priority order
//! - **Status**: start-up probes and the [`SystemStatus`] snapshot

pub mod backend;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod http;
pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod status;

pub use backend::{LlmBackend, LlmProvider, LlmRequest, LlmResponse, ProviderConfig};
pub use error::{FailureKind, GenerationError, LlmError, ProviderFailure};
pub use fallback::{FallbackChain, Generation, GenerationOutcome};
pub use http::{HttpBackend, WireFormat, backend_for};
pub use prompt::{BlogFormat, PromptTemplate, render_prompt, research_title};
pub use status::{ConnectivityProbe, ProviderStatus, StatusReporter, SystemStatus, probe_local_daemon};
