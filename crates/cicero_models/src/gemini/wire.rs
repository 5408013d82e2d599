//! Wire types for the Gemini `generateContent` REST endpoint.

use cicero_core::{GenerationParams, ImagePayload};
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySettingWire>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, params: &GenerationParams, image: Option<&ImagePayload>) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().clone(),
                    data: image.data().clone(),
                },
            });
        }
        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: *params.temperature(),
                top_k: *params.top_k(),
                top_p: *params.top_p(),
                max_output_tokens: *params.max_output_tokens(),
            },
            safety_settings: params
                .safety()
                .iter()
                .map(|s| SafetySettingWire {
                    category: s.category().clone(),
                    threshold: s.threshold().clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SafetySettingWire {
    pub category: String,
    pub threshold: String,
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseCandidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error payload returned by the API, sometimes inside a 200 response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}
