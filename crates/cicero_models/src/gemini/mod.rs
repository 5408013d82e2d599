//! Gemini REST backend adapter.
//!
//! Calls the `generateContent` endpoint directly over reqwest so that
//! per-model failures surface with their HTTP status, which the
//! orchestrator's candidate loop depends on.

mod wire;

use async_trait::async_trait;
use cicero_core::{GenerationParams, ImagePayload, ModelCandidates, RetryPolicy};
use cicero_error::{ConfigError, GenerationError, GenerationErrorKind};
use cicero_interface::GenerationBackend;
use derive_getters::Getters;
use tracing::{debug, instrument, warn};
use wire::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key for the generative language API
    api_key: String,
    /// Base URL, overridable for tests and proxies
    #[builder(default = "String::from(DEFAULT_BASE_URL)")]
    base_url: String,
    /// Model candidate configuration
    #[builder(default)]
    models: ModelCandidates,
    /// Retry policy for the orchestrator
    #[builder(default)]
    retry: RetryPolicy,
}

impl GeminiConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `GEMINI_API_KEY` (required)
    /// - `GEMINI_BASE_URL` (default: the public v1beta endpoint)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::new("GEMINI_API_KEY not set"))?;
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(GeminiConfigBuilder::default()
            .api_key(api_key)
            .base_url(base_url)
            .build()
            .expect("Valid GeminiConfig"))
    }
}

/// Gemini generation client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Creates a client from configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        // Candidate lists mix bare and "models/"-prefixed identifiers.
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    #[instrument(skip(self, prompt, params, image), fields(model = %model))]
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
        image: Option<&ImagePayload>,
    ) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::new(prompt, params, image);

        let response = self
            .http
            .post(self.endpoint(model))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GenerateContentResponse>(&text)
                .ok()
                .and_then(|r| r.error.map(|e| e.message))
                .unwrap_or(text);
            warn!(status = status.as_u16(), "Gemini request failed");
            return Err(GenerationError::new(GenerationErrorKind::from_status(
                status.as_u16(),
                message,
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string()))
        })?;

        if let Some(error) = parsed.error {
            // Some failures arrive inside a 200 body with only a message.
            return Err(GenerationError::new(match error.code {
                Some(code) => GenerationErrorKind::from_status(code, error.message),
                None => GenerationErrorKind::from_message(error.message),
            }));
        }

        let text = parsed
            .first_text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        debug!(length = text.len(), "Generated response");
        Ok(text)
    }
}
