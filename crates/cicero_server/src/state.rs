//! Shared request-handler state.

use cicero_interface::{HistoryStore, IdentityVerifier, ProfileStore, SearchBackend};
use cicero_models::{HealthProber, Orchestrator};
use cicero_rate_limit::ClientLimiter;
use std::sync::Arc;

/// Collaborators injected into every handler.
///
/// Constructed once at startup; handlers receive clones of the Arc
/// handles. Nothing here is reachable through module-level statics.
#[derive(Clone)]
pub struct AppState {
    /// Generation orchestrator.
    pub orchestrator: Arc<Orchestrator>,
    /// Backend health prober.
    pub prober: Arc<HealthProber>,
    /// Bearer token verifier.
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Conversation history store.
    pub history: Arc<dyn HistoryStore>,
    /// User profile store.
    pub profiles: Arc<dyn ProfileStore>,
    /// Web search collaborator.
    pub search: Arc<dyn SearchBackend>,
    /// Per-client request limiter for the ask endpoint.
    pub limiter: Arc<ClientLimiter>,
}
