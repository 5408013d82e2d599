//! Web search seam.

use async_trait::async_trait;
use cicero_core::SearchOutcome;

/// Web search collaborator.
///
/// The signature is infallible: implementations degrade to
/// [`SearchOutcome::unavailable`] on any upstream failure so that search
/// unavailability never turns into a request error.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search the web, returning at most `count` results.
    async fn search(&self, query: &str, count: u32) -> SearchOutcome;
}
