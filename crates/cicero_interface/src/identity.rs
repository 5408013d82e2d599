//! Identity verification seam.

use async_trait::async_trait;
use cicero_core::UserIdentity;
use cicero_error::AuthError;

/// Verifies bearer tokens against the identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an ID token and return the user it belongs to.
    async fn verify(&self, token: &str) -> Result<UserIdentity, AuthError>;
}
