//! Search-grounded generation endpoint.

use super::persist;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use cicero_core::{prompt, GenerationRequest, HistoryRecordBuilder, RequestKind};
use cicero_error::ValidationError;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

/// Results requested from the search backend per query.
const RESULT_COUNT: u32 = 5;

/// Body of `POST /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Web search plus a generation grounded in the retrieved snippets.
///
/// Search unavailability is not an error: generation proceeds on a
/// placeholder context and `sources` comes back empty.
#[instrument(skip(state, payload), fields(user = %user.0.uid()))]
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(ValidationError::new("Search query is required").into());
    }

    let outcome = state.search.search(&payload.query, RESULT_COUNT).await;
    let request =
        GenerationRequest::text(prompt::grounded_prompt(&payload.query, outcome.context()));
    let generated = state.orchestrator.generate(&request).await?;

    let record = HistoryRecordBuilder::default()
        .user_id(user.0.uid().clone())
        .prompt(payload.query)
        .response(generated.text().clone())
        .kind(RequestKind::Search)
        .timestamp(Utc::now())
        .model(Some(generated.model().clone()))
        .success(true)
        .search_results(Some(outcome.results().clone()))
        .build()
        .expect("Valid HistoryRecord");
    persist(&state.history, record).await;

    Ok(Json(json!({
        "response": generated.text(),
        "sources": outcome.results(),
    })))
}
