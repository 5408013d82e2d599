//! Generation parameters and safety settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerationParams {
    /// Sampling temperature
    temperature: f32,
    /// Top-k sampling parameter
    top_k: u32,
    /// Top-p sampling parameter
    top_p: f32,
    /// Maximum tokens to generate
    max_output_tokens: u32,
    /// Safety thresholds applied to the call
    #[builder(default = "SafetySetting::defaults()")]
    safety: Vec<SafetySetting>,
}

impl GenerationParams {
    /// Parameters for text, code, and search generation.
    pub fn text() -> Self {
        GenerationParamsBuilder::default()
            .temperature(0.7f32)
            .top_k(40u32)
            .top_p(0.95f32)
            .max_output_tokens(8192u32)
            .build()
            .expect("Valid GenerationParams")
    }

    /// Parameters for vision generation.
    pub fn vision() -> Self {
        GenerationParamsBuilder::default()
            .temperature(0.4f32)
            .top_k(32u32)
            .top_p(1.0f32)
            .max_output_tokens(4096u32)
            .build()
            .expect("Valid GenerationParams")
    }
}

/// A harm category blocked above a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SafetySetting {
    /// Harm category identifier
    category: String,
    /// Blocking threshold
    threshold: String,
}

impl SafetySetting {
    /// Create a safety setting.
    pub fn new(category: impl Into<String>, threshold: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: threshold.into(),
        }
    }

    /// Default thresholds: harassment and hate speech blocked at medium.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("HARM_CATEGORY_HARASSMENT", "BLOCK_MEDIUM_AND_ABOVE"),
            Self::new("HARM_CATEGORY_HATE_SPEECH", "BLOCK_MEDIUM_AND_ABOVE"),
        ]
    }
}
