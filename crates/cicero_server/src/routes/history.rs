//! Conversation history endpoints.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

/// Query string of `GET /api/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// List the caller's history, newest first. The limit is clamped to
/// 1..=100.
#[instrument(skip(state), fields(user = %user.0.uid()))]
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let records = state.history.list(user.0.uid(), limit).await?;
    Ok(Json(json!({ "history": records })))
}

/// Delete all of the caller's history.
#[instrument(skip(state), fields(user = %user.0.uid()))]
pub async fn clear(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.history.clear(user.0.uid()).await?;
    info!(count, "Cleared history");
    Ok(Json(json!({
        "message": format!("Cleared {} chat history entries", count)
    })))
}

/// Delete one history entry. Entries owned by other users come back as
/// 403 without being touched.
#[instrument(skip(state), fields(user = %user.0.uid()))]
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.history.delete(user.0.uid(), &id).await?;
    Ok(Json(json!({ "message": "Chat entry deleted successfully" })))
}
