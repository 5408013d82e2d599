//! Generation outcome types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A successful generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerationOutcome {
    /// Generated text
    text: String,
    /// Model that produced the text
    model: String,
}

impl GenerationOutcome {
    /// Create an outcome.
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    /// Consume the outcome, returning the generated text.
    pub fn into_text(self) -> String {
        self.text
    }
}
