//! Generation orchestration: candidate iteration, bounded retries with
//! exponential backoff, and the final rescue call.

use cicero_core::{
    prompt, GenerationOutcome, GenerationParams, GenerationRequest, ModelCandidates, RequestKind,
    RetryPolicy,
};
use cicero_error::{CiceroResult, GenerationError, GenerationErrorKind, ValidationError};
use cicero_interface::GenerationBackend;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Canary prompt for the rescue call after all attempts are exhausted.
pub const RESCUE_PROMPT: &str = "Hello, are you working?";

/// Orchestrates generation calls against an ordered model candidate list.
///
/// One *attempt* is a full pass over the candidate list. Model-unavailable
/// failures advance to the next candidate without consuming the attempt;
/// any other failure ends the attempt immediately. Failed attempts retry
/// after a bounded exponential backoff with deterministic jitter, and an
/// exhausted policy is followed by exactly one rescue call against the
/// fallback model.
///
/// Constructed once at startup and shared via `Arc`; all configuration is
/// immutable after construction.
pub struct Orchestrator {
    backend: Arc<dyn GenerationBackend>,
    models: ModelCandidates,
    retry: RetryPolicy,
}

impl Orchestrator {
    /// Creates an orchestrator over a backend.
    pub fn new(backend: Arc<dyn GenerationBackend>, models: ModelCandidates, retry: RetryPolicy) -> Self {
        Self {
            backend,
            models,
            retry,
        }
    }

    /// Gets the model candidate configuration.
    pub fn models(&self) -> &ModelCandidates {
        &self.models
    }

    /// Gets the retry policy.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Generate a response for a validated request.
    ///
    /// Validation runs first and rejects before any backend call.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn generate(&self, request: &GenerationRequest) -> CiceroResult<GenerationOutcome> {
        request.validate()?;

        let shaped = prompt::shape(request.prompt(), *request.kind());

        if *request.kind() == RequestKind::Image {
            return self.generate_vision(&shaped, request).await;
        }

        let params = GenerationParams::text();
        let candidates = self.models.candidates_for(*request.kind());
        let mut last_error: Option<GenerationError> = None;

        for attempt in 1..=*self.retry.max_attempts() {
            let delay = self.retry.backoff_before(attempt);
            if !delay.is_zero() {
                info!(attempt, delay_ms = delay.as_millis() as u64, "Retrying after backoff");
                tokio::time::sleep(delay).await;
            }

            match self.run_candidates(&candidates, &shaped, &params).await {
                Ok(outcome) => {
                    info!(
                        attempt,
                        model = %outcome.model(),
                        length = outcome.text().len(),
                        "Generation succeeded"
                    );
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Attempt failed");
                    last_error = Some(e);
                }
            }
        }

        self.rescue(last_error).await
    }

    /// Single vision call; no candidate iteration, no retry.
    async fn generate_vision(
        &self,
        prompt: &str,
        request: &GenerationRequest,
    ) -> CiceroResult<GenerationOutcome> {
        let image = request
            .image()
            .as_ref()
            .ok_or_else(|| ValidationError::new("Image data required for image analysis"))?;
        let model = self.models.vision();
        let text = self
            .backend
            .complete(model, prompt, &GenerationParams::vision(), Some(image))
            .await?;
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }
        Ok(GenerationOutcome::new(text, model.clone()))
    }

    /// One attempt: iterate the candidate list in order.
    async fn run_candidates(
        &self,
        candidates: &[String],
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerationOutcome, GenerationError> {
        let mut last_unavailable: Option<GenerationError> = None;

        for model in candidates {
            match self.backend.complete(model, prompt, params, None).await {
                Ok(text) if text.trim().is_empty() => {
                    return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
                }
                Ok(text) => return Ok(GenerationOutcome::new(text, model.clone())),
                Err(e) if e.is_model_unavailable() => {
                    warn!(model = %model, "Model unavailable, trying next candidate");
                    last_unavailable = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Candidate lists are never empty, so every path through the loop
        // either returned or recorded an unavailable error.
        Err(last_unavailable
            .unwrap_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse)))
    }

    /// One out-of-band call against the fallback model after exhaustion.
    ///
    /// NOTE: on success this returns the canary response as the outcome of
    /// the caller's original request, even though the text is unrelated to
    /// their prompt. Clients depend on getting *some* response here;
    /// questionable, kept pending product clarification.
    async fn rescue(
        &self,
        last_error: Option<GenerationError>,
    ) -> CiceroResult<GenerationOutcome> {
        let fallback = self.models.fallback();
        info!(model = %fallback, "All attempts exhausted, probing fallback model");

        let rescue = self
            .backend
            .complete(fallback, RESCUE_PROMPT, &GenerationParams::text(), None)
            .await;

        match rescue {
            Ok(text) if !text.trim().is_empty() => {
                warn!(model = %fallback, "Returning rescue response in place of original request");
                Ok(GenerationOutcome::new(text, fallback.clone()))
            }
            Ok(_) | Err(_) => {
                // Surface the last real generation error, not the rescue's.
                Err(last_error
                    .unwrap_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))
                    .into())
            }
        }
    }
}
