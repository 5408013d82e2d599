//! HTTP API server for the Cicero assistant backend.
//!
//! Exposes generation, search, image analysis, profile, and history
//! endpoints over axum, with bearer token authentication and per-client
//! rate limiting on the primary ask endpoint.

mod auth;
mod config;
mod error;
mod routes;
mod search;
mod state;

pub use auth::{AuthUser, FirebaseVerifier};
pub use config::{AppConfig, AppConfigBuilder};
pub use error::ApiError;
pub use routes::create_router;
pub use search::GoogleSearchClient;
pub use state::AppState;
