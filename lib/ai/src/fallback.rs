//! Provider fallback chain.
//!
//! Backends are tried one at a time in the order given at construction.
//! The first one that returns content wins and nothing after it is called.
//! Backends without a credential are skipped without being recorded.

use crate::backend::{LlmBackend, LlmProvider, LlmRequest};
use crate::error::GenerationError;
use blogsmith_core::GenerationId;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Content produced by one provider in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Correlates log lines for this run.
    pub id: GenerationId,
    /// The generated text.
    pub content: String,
    /// Provider that produced it.
    pub provider: LlmProvider,
    /// Model that produced it.
    pub model: String,
    /// Wall time for the whole chain, including failed attempts.
    pub latency_ms: u64,
}

/// Result of running a chain.
pub type GenerationOutcome = Result<Generation, GenerationError>;

/// An ordered list of backends.
#[derive(Clone)]
pub struct FallbackChain {
    backends: Vec<Arc<dyn LlmBackend>>,
}

impl FallbackChain {
    /// Creates a chain; `backends` is the priority order.
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn LlmBackend>>) -> Self {
        Self { backends }
    }

    /// Providers in priority order.
    pub fn providers(&self) -> impl Iterator<Item = LlmProvider> + '_ {
        self.backends.iter().map(|backend| backend.provider())
    }

    /// Whether any backend in the chain can be attempted.
    #[must_use]
    pub fn has_configured_provider(&self) -> bool {
        self.backends.iter().any(|backend| backend.has_credential())
    }

    /// Runs the chain for `request`.
    ///
    /// # Errors
    ///
    /// `NoProvidersConfigured` without any network call when no backend has
    /// a credential, otherwise `AllProvidersFailed` with one failure per
    /// attempted backend in attempt order.
    #[instrument(skip_all, fields(generation_id = tracing::field::Empty))]
    pub async fn generate(&self, request: &LlmRequest) -> GenerationOutcome {
        let id = GenerationId::new();
        tracing::Span::current().record("generation_id", tracing::field::display(id));

        if !self.has_configured_provider() {
            warn!("No provider has a credential; skipping generation");
            return Err(GenerationError::NoProvidersConfigured);
        }

        let started = Instant::now();
        let mut failures = Vec::new();

        for backend in &self.backends {
            if !backend.has_credential() {
                continue;
            }

            let provider = backend.provider();
            info!(%provider, model = backend.model(), "Trying provider");

            match backend.generate(request).await {
                Ok(response) => {
                    info!(
                        %provider,
                        content_length = response.content.len(),
                        "Provider generated content"
                    );
                    return Ok(Generation {
                        id,
                        content: response.content,
                        provider: response.provider,
                        model: response.model,
                        latency_ms: u64::try_from(started.elapsed().as_millis())
                            .unwrap_or(u64::MAX),
                    });
                }
                Err(failure) => {
                    warn!(%provider, error = %failure, "Provider failed");
                    failures.push(failure);
                }
            }
        }

        Err(GenerationError::AllProvidersFailed { failures })
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.providers()).finish()
    }
}
