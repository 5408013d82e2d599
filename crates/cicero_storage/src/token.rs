//! Bearer tokens for Google Cloud REST calls.

use cicero_error::{StorageError, StorageErrorKind};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug)]
enum Source {
    Static(String),
    Metadata {
        http: reqwest::Client,
        cache: Mutex<Option<CachedToken>>,
    },
}

/// Source of bearer tokens for the document store.
///
/// A static token comes from the environment; otherwise tokens are fetched
/// from the GCE metadata server and cached until close to expiry.
#[derive(Debug)]
pub struct TokenProvider {
    source: Source,
}

impl TokenProvider {
    /// Provider with a fixed pre-issued token.
    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            source: Source::Static(token.into()),
        }
    }

    /// Provider from the environment: a static token when
    /// `GOOGLE_ACCESS_TOKEN` is set, the metadata server otherwise.
    pub fn from_env() -> Self {
        match std::env::var("GOOGLE_ACCESS_TOKEN") {
            Ok(token) => Self::fixed(token),
            Err(_) => Self {
                source: Source::Metadata {
                    http: reqwest::Client::new(),
                    cache: Mutex::new(None),
                },
            },
        }
    }

    /// Current bearer token.
    pub async fn token(&self) -> Result<String, StorageError> {
        match &self.source {
            Source::Static(token) => Ok(token.clone()),
            Source::Metadata { http, cache } => {
                let mut cache = cache.lock().await;
                if let Some(cached) = cache.as_ref() {
                    if Instant::now() < cached.expires_at {
                        return Ok(cached.token.clone());
                    }
                }

                let response = http
                    .get(METADATA_TOKEN_URL)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| StorageError::new(StorageErrorKind::Request(e.to_string())))?;
                let token: MetadataToken = response
                    .json()
                    .await
                    .map_err(|e| StorageError::new(StorageErrorKind::Request(e.to_string())))?;

                debug!(expires_in = token.expires_in, "Fetched metadata token");
                let expires_at = Instant::now()
                    + Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
                *cache = Some(CachedToken {
                    token: token.access_token.clone(),
                    expires_at,
                });
                Ok(token.access_token)
            }
        }
    }
}
