//! HTTP route handlers.

mod ask;
mod history;
mod image;
mod search;
mod user;

use crate::state::AppState;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use cicero_core::HistoryRecord;
use cicero_interface::HistoryStore;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, instrument, warn};

/// Creates the API router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/ask/health", get(ask::backend_health))
        .route("/api/ask/test", post(ask::test))
        .route("/api/ask", post(ask::ask))
        .route("/api/ask/stream", post(ask::stream))
        .route("/api/search", post(search::search))
        .route("/api/image", post(image::analyze))
        .route(
            "/api/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/history", get(history::list).delete(history::clear))
        .route("/api/history/:id", delete(history::delete_entry))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Service banner.
#[instrument(skip_all)]
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Cicero AI Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/api/ask", "/api/search", "/api/image", "/api/user", "/api/history"],
    }))
}

/// Liveness check.
#[instrument(skip_all)]
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Append a record, swallowing store failures.
///
/// History is best-effort: a dead store must never fail the request
/// that produced the response.
pub(crate) async fn persist(history: &Arc<dyn HistoryStore>, record: HistoryRecord) {
    if let Err(e) = history.append(record).await {
        error!(error = %e, "Failed to save to history");
    }
}
