//! Cicero API server binary.
//!
//! Wires the Gemini backend, stores, and HTTP surface together from
//! environment configuration and serves until Ctrl+C.

use cicero_interface::{HistoryStore, ProfileStore, SearchBackend};
use cicero_models::{GeminiClient, GeminiConfig, HealthProber, Orchestrator};
use cicero_rate_limit::{ClientLimiter, RateLimitConfig};
use cicero_server::{create_router, AppConfig, AppState, FirebaseVerifier, GoogleSearchClient};
use cicero_storage::{
    FirestoreClient, FirestoreConfig, FirestoreHistoryStore, FirestoreProfileStore,
    MemoryHistoryStore, MemoryProfileStore, TokenProvider,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(addr = %config.bind_addr(), "Starting Cicero API server");

    let gemini_config = GeminiConfig::from_env()?;
    let api_key_configured = !gemini_config.api_key().is_empty();
    let models = gemini_config.models().clone();
    let retry = gemini_config.retry().clone();
    let backend = Arc::new(GeminiClient::new(gemini_config));
    let orchestrator = Arc::new(Orchestrator::new(backend, models, retry));
    let prober = Arc::new(HealthProber::new(orchestrator.clone(), api_key_configured));

    let verifier = Arc::new(FirebaseVerifier::from_env()?);

    let (history, profiles): (Arc<dyn HistoryStore>, Arc<dyn ProfileStore>) =
        match FirestoreConfig::from_env() {
            Ok(firestore_config) => {
                info!(project = %firestore_config.project_id(), "Using Firestore stores");
                let client = Arc::new(FirestoreClient::new(
                    firestore_config,
                    TokenProvider::from_env(),
                ));
                (
                    Arc::new(FirestoreHistoryStore::new(client.clone())),
                    Arc::new(FirestoreProfileStore::new(client)),
                )
            }
            Err(e) => {
                warn!(error = %e, "Firestore not configured, using in-memory stores");
                (
                    Arc::new(MemoryHistoryStore::new()),
                    Arc::new(MemoryProfileStore::new()),
                )
            }
        };

    let search: Arc<dyn SearchBackend> = match GoogleSearchClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "Search not configured, search responses will degrade");
            Arc::new(GoogleSearchClient::new("", ""))
        }
    };
    let limiter = Arc::new(ClientLimiter::new(RateLimitConfig::default()));

    let state = AppState {
        orchestrator,
        prober,
        verifier,
        history,
        profiles,
        search,
        limiter,
    };
    let router = create_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening. Press Ctrl+C to stop.");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
    }
}
