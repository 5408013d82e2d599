//! Generation backend seam.

use async_trait::async_trait;
use cicero_core::{GenerationParams, ImagePayload};
use cicero_error::GenerationError;

/// One raw call against a generative model.
///
/// Implementations map transport and API failures into the typed
/// [`GenerationError`] categories; the orchestrator never inspects
/// message strings.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text from a prompt against a specific model.
    ///
    /// `image` carries inline media for vision calls. A successful return
    /// may still be empty; the orchestrator treats that as a failure.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
        image: Option<&ImagePayload>,
    ) -> Result<String, GenerationError>;
}
