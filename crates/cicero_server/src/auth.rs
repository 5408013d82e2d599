//! Bearer token authentication.
//!
//! [`AuthUser`] is the extractor handlers take to require a signed-in
//! user; [`FirebaseVerifier`] checks ID tokens against the Identity
//! Toolkit `accounts:lookup` endpoint.

use crate::error::ApiError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cicero_core::{UserIdentity, UserIdentityBuilder};
use cicero_error::{AuthError, ConfigError};
use cicero_interface::IdentityVerifier;
use serde::Deserialize;
use tracing::{instrument, warn};

/// The verified identity of the requesting user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserIdentity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::new("Missing authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::new("Malformed authorization header"))?;

        let identity = state.verifier.verify(token).await.map_err(|e| {
            warn!(error = %e, "Token verification failed");
            e
        })?;
        Ok(AuthUser(identity))
    }
}

const DEFAULT_LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Option<Vec<LookupUser>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

/// Verifies Firebase ID tokens through the Identity Toolkit REST API.
#[derive(Debug)]
pub struct FirebaseVerifier {
    api_key: String,
    lookup_url: String,
    http: reqwest::Client,
}

impl FirebaseVerifier {
    /// Creates a verifier with the given web API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a verifier from environment variables
    ///
    /// Reads `FIREBASE_API_KEY` (required).
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| ConfigError::new("FIREBASE_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    #[instrument(skip_all)]
    async fn verify(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let url = format!("{}?key={}", self.lookup_url, self.api_key);
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| AuthError::new(format!("Identity lookup failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AuthError::new(format!(
                "Identity lookup rejected with status {}",
                response.status()
            )));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::new(format!("Invalid identity response: {}", e)))?;
        let user = body
            .users
            .and_then(|mut users| (!users.is_empty()).then(|| users.remove(0)))
            .ok_or_else(|| AuthError::new("Token does not match a known user"))?;

        let mut builder = UserIdentityBuilder::default();
        builder.uid(user.local_id);
        builder.email(user.email);
        builder.name(user.display_name);
        Ok(builder.build().expect("Valid UserIdentity"))
    }
}
