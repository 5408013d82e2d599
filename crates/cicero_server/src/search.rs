//! Google Custom Search integration.

use async_trait::async_trait;
use cicero_core::{SearchOutcome, SearchResult, SearchResultBuilder};
use cicero_error::{ConfigError, SearchError};
use cicero_interface::SearchBackend;
use serde::Deserialize;
use tracing::{instrument, warn};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Custom Search JSON API client.
///
/// Upstream failures never propagate; any error degrades the response to
/// [`SearchOutcome::unavailable`] so generation can still proceed on the
/// bare prompt.
#[derive(Debug)]
pub struct GoogleSearchClient {
    api_key: String,
    engine_id: String,
    base_url: String,
    http: reqwest::Client,
}

impl GoogleSearchClient {
    /// Creates a client for a search engine.
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from environment variables
    ///
    /// Reads `GOOGLE_SEARCH_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_SEARCH_API_KEY")
            .map_err(|_| ConfigError::new("GOOGLE_SEARCH_API_KEY not set"))?;
        let engine_id = std::env::var("GOOGLE_SEARCH_ENGINE_ID")
            .map_err(|_| ConfigError::new("GOOGLE_SEARCH_ENGINE_ID not set"))?;
        Ok(Self::new(api_key, engine_id))
    }

    async fn fetch(&self, query: &str, count: u32) -> Result<SearchOutcome, SearchError> {
        let num = count.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::new(e.to_string()))?
            .error_for_status()
            .map_err(|e| SearchError::new(e.to_string()))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::new(format!("Malformed search response: {e}")))?;
        let results = body
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                SearchResultBuilder::default()
                    .title(item.title)
                    .link(item.link)
                    .snippet(item.snippet)
                    .build()
                    .expect("Valid SearchResult")
            })
            .collect::<Vec<SearchResult>>();
        Ok(SearchOutcome::new(results))
    }
}

#[async_trait]
impl SearchBackend for GoogleSearchClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, count: u32) -> SearchOutcome {
        match self.fetch(query, count).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Search request failed, degrading");
                SearchOutcome::unavailable(query)
            }
        }
    }
}
