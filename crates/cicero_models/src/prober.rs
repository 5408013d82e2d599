//! Backend liveness probing.

use crate::Orchestrator;
use cicero_core::{GenerationRequest, ModelCandidates, RetryPolicy};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};

/// Canary prompt for health checks.
pub const HEALTH_PROMPT: &str = "Hello, respond with 'OK' if you are working.";

/// Reported model configuration for the health endpoint.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct ModelReport {
    /// Model candidate configuration
    models: ModelCandidates,
    /// Retry policy in effect
    retry: RetryPolicy,
    /// Whether an API key was configured at startup
    api_key_configured: bool,
}

/// Probes the generation backend with a canary prompt.
///
/// Runs through the full orchestrator path so a healthy probe exercises
/// the same candidate and retry machinery as a real request.
pub struct HealthProber {
    orchestrator: Arc<Orchestrator>,
    api_key_configured: bool,
}

impl HealthProber {
    /// Creates a prober over an orchestrator.
    pub fn new(orchestrator: Arc<Orchestrator>, api_key_configured: bool) -> Self {
        Self {
            orchestrator,
            api_key_configured,
        }
    }

    /// True iff the backend answered the canary with text containing "ok".
    ///
    /// Never propagates an error.
    #[instrument(skip(self))]
    pub async fn check(&self) -> bool {
        let request = GenerationRequest::text(HEALTH_PROMPT);
        match self.orchestrator.generate(&request).await {
            Ok(outcome) => outcome.text().to_lowercase().contains("ok"),
            Err(e) => {
                error!(error = %e, "Health check failed");
                false
            }
        }
    }

    /// Model configuration for the health endpoint payload.
    pub fn model_report(&self) -> ModelReport {
        ModelReport {
            models: self.orchestrator.models().clone(),
            retry: self.orchestrator.retry().clone(),
            api_key_configured: self.api_key_configured,
        }
    }
}
