//! Gemini adapter and generation orchestration for Cicero.
//!
//! The orchestrator owns model selection, bounded retries with exponential
//! backoff, and multi-model fallback; the Gemini client is one
//! [`cicero_interface::GenerationBackend`] implementation behind it.

mod gemini;
mod orchestrator;
mod prober;
mod stream;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use orchestrator::{Orchestrator, RESCUE_PROMPT};
pub use prober::{HealthProber, ModelReport, HEALTH_PROMPT};
pub use stream::{chunk_stream, CHUNK_DELAY};
