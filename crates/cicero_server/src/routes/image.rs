//! Image analysis endpoint.

use super::persist;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use cicero_core::{
    GenerationRequest, GenerationRequestBuilder, HistoryRecordBuilder, ImagePayloadBuilder,
    RequestKind,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::instrument;

/// Body of `POST /api/image`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

/// Analyze an image against the vision model, or answer an image-related
/// question when no image bytes were sent.
#[instrument(skip(state, payload), fields(user = %user.0.uid()))]
pub async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ImageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(cicero_error::ValidationError::new("Prompt is required").into());
    }

    let request = match payload.image_data {
        Some(data) => GenerationRequestBuilder::default()
            .prompt(payload.prompt.clone())
            .kind(RequestKind::Image)
            .image(Some(
                ImagePayloadBuilder::default()
                    .data(data)
                    .mime_type(payload.mime_type)
                    .build()
                    .expect("Valid ImagePayload"),
            ))
            .build()
            .expect("Valid GenerationRequest"),
        None => GenerationRequest::text(format!(
            "Regarding images and the following request: {}",
            payload.prompt
        )),
    };
    request.validate()?;

    let started = Instant::now();
    let outcome = state.orchestrator.generate(&request).await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let record = HistoryRecordBuilder::default()
        .user_id(user.0.uid().clone())
        .prompt(payload.prompt)
        .response(outcome.text().clone())
        .kind(RequestKind::Image)
        .timestamp(Utc::now())
        .processing_time_ms(Some(elapsed_ms))
        .model(Some(outcome.model().clone()))
        .success(true)
        .build()
        .expect("Valid HistoryRecord");
    persist(&state.history, record).await;

    Ok(Json(json!({
        "response": outcome.text(),
        "timestamp": Utc::now().to_rfc3339(),
        "processingTime": elapsed_ms,
        "success": true,
    })))
}
