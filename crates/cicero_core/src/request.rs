//! Generation request types.

use crate::RequestKind;
use cicero_error::ValidationError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Inline image payload for vision requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImagePayload {
    /// Base64-encoded image bytes
    data: String,
    /// MIME type of the image
    #[builder(default = "String::from(\"image/jpeg\")")]
    mime_type: String,
}

impl ImagePayload {
    /// Create a payload with the default JPEG mime type.
    pub fn jpeg(data: impl Into<String>) -> Self {
        ImagePayloadBuilder::default()
            .data(data)
            .build()
            .expect("Valid ImagePayload")
    }

    /// Encode raw image bytes into a payload.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        use base64::Engine;
        ImagePayloadBuilder::default()
            .data(base64::engine::general_purpose::STANDARD.encode(bytes))
            .mime_type(mime_type)
            .build()
            .expect("Valid ImagePayload")
    }
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// User prompt
    prompt: String,
    /// Kind of response requested
    #[builder(default)]
    kind: RequestKind,
    /// Inline image, required when kind is [`RequestKind::Image`]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    image: Option<ImagePayload>,
}

impl GenerationRequest {
    /// Plain text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        GenerationRequestBuilder::default()
            .prompt(prompt)
            .build()
            .expect("Valid GenerationRequest")
    }

    /// Request of a specific kind, without an image.
    pub fn of_kind(prompt: impl Into<String>, kind: RequestKind) -> Self {
        GenerationRequestBuilder::default()
            .prompt(prompt)
            .kind(kind)
            .build()
            .expect("Valid GenerationRequest")
    }

    /// Check request invariants before any backend call.
    ///
    /// The prompt must be non-empty, and image requests must carry image
    /// bytes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::new("Prompt is required"));
        }
        if self.kind == RequestKind::Image && self.image.is_none() {
            return Err(ValidationError::new(
                "Image data required for image analysis",
            ));
        }
        Ok(())
    }
}
