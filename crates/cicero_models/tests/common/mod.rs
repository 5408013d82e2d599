//! Scripted generation backend for orchestrator tests.

use async_trait::async_trait;
use cicero_core::{GenerationParams, ImagePayload};
use cicero_error::{GenerationError, GenerationErrorKind};
use cicero_interface::GenerationBackend;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that replays a scripted sequence of results and records calls.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, GenerationErrorKind>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<String, GenerationErrorKind>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded (model, prompt) pairs, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("calls mutex").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls mutex").len()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        _params: &GenerationParams,
        _image: Option<&ImagePayload>,
    ) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .expect("calls mutex")
            .push((model.to_string(), prompt.to_string()));
        let next = self
            .script
            .lock()
            .expect("script mutex")
            .pop_front()
            .expect("script exhausted: unexpected backend call");
        next.map_err(GenerationError::new)
    }
}

/// Shorthand for a model-unavailable script entry.
pub fn unavailable(model: &str) -> Result<String, GenerationErrorKind> {
    Err(GenerationErrorKind::ModelUnavailable(model.to_string()))
}

/// Shorthand for a quota-exceeded script entry.
pub fn quota() -> Result<String, GenerationErrorKind> {
    Err(GenerationErrorKind::Quota("quota exhausted".to_string()))
}
