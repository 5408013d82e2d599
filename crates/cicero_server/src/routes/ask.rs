//! Generation endpoints.

use super::persist;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{ConnectInfo, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use cicero_core::{
    GenerationRequest, GenerationRequestBuilder, HistoryRecordBuilder, ImagePayload, RequestKind,
};
use cicero_models::chunk_stream;
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Body of `POST /api/ask` and `POST /api/ask/stream`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub prompt: String,
    #[serde(rename = "type", default)]
    pub kind: RequestKind,
    #[serde(default)]
    pub image_data: Option<String>,
}

impl AskRequest {
    fn into_generation_request(self) -> GenerationRequest {
        GenerationRequestBuilder::default()
            .prompt(self.prompt)
            .kind(self.kind)
            .image(self.image_data.map(ImagePayload::jpeg))
            .build()
            .expect("Valid GenerationRequest")
    }
}

/// Body of `POST /api/ask/test`.
#[derive(Debug, Deserialize)]
pub struct TestRequest {
    #[serde(default = "default_test_prompt")]
    pub prompt: String,
}

fn default_test_prompt() -> String {
    "Hello, this is a test message.".to_string()
}

/// Generation backend health, with the active model lineup.
#[instrument(skip_all)]
pub async fn backend_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let healthy = state.prober.check().await;
    let mut body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Ok(serde_json::Value::Object(report)) = serde_json::to_value(state.prober.model_report())
    {
        for (key, value) in report {
            body[key] = value;
        }
    }
    Json(body)
}

/// Unauthenticated smoke test. Never returns an error status; failures
/// come back as a canned payload with `success: false`.
#[instrument(skip_all)]
pub async fn test(
    State(state): State<AppState>,
    Json(payload): Json<TestRequest>,
) -> Json<serde_json::Value> {
    info!(prompt = %payload.prompt, "Test endpoint called");
    let request = GenerationRequest::text(payload.prompt.clone());
    match state.orchestrator.generate(&request).await {
        Ok(outcome) => Json(json!({
            "response": outcome.text(),
            "timestamp": Utc::now().to_rfc3339(),
            "model": "test-mode",
            "success": true,
        })),
        Err(e) => {
            warn!(error = %e, "Test generation failed");
            Json(json!({
                "response": format!(
                    "Test response for: \"{}\". The AI service is currently being optimized.",
                    payload.prompt
                ),
                "timestamp": Utc::now().to_rfc3339(),
                "model": "fallback",
                "success": false,
                "error": e.to_string(),
            }))
        }
    }
}

/// Main generation endpoint. Authenticated and rate limited per client
/// address; every request is persisted to history, success or failure.
#[instrument(skip(state, payload), fields(user = %user.0.uid()))]
pub async fn ask(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    user: AuthUser,
    Json(payload): Json<AskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.limiter.try_acquire(&addr.ip().to_string())?;

    let request = payload.into_generation_request();
    request.validate()?;
    let kind = *request.kind();
    info!(kind = %kind, "Processing generation request");

    let uid = user.0.uid().clone();
    let started = Instant::now();
    match state.orchestrator.generate(&request).await {
        Ok(outcome) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            info!(elapsed_ms, model = %outcome.model(), "Response generated");

            let record = HistoryRecordBuilder::default()
                .user_id(uid)
                .prompt(request.prompt().clone())
                .response(outcome.text().clone())
                .kind(kind)
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
                "type": kind.as_str(),
                "success": true,
            })))
        }
        Err(e) => {
            let record = HistoryRecordBuilder::default()
                .user_id(uid)
                .prompt(request.prompt().clone())
                .response(format!("Error: {}", e))
                .kind(kind)
                .timestamp(Utc::now())
                .success(false)
                .error(Some(e.to_string()))
                .build()
                .expect("Valid HistoryRecord");
            persist(&state.history, record).await;

            Err(ApiError::from(e))
        }
    }
}

/// Chunked generation over SSE.
#[instrument(skip(state, payload), fields(user = %_user.0.uid()))]
pub async fn stream(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<AskRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let request = GenerationRequest::text(payload.prompt);
    request.validate()?;

    let orchestrator = state.orchestrator.clone();
    let events = chunk_stream(async move { orchestrator.generate(&request).await });
    let frames = events.map(|event| Event::default().json_data(&event));

    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}
