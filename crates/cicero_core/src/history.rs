//! Interaction history records.

use crate::{RequestKind, SearchResult};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One persisted interaction.
///
/// Serializes with the field names the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Document id, assigned by the store on append
    #[builder(default)]
    id: String,
    /// Owning user id
    user_id: String,
    /// Original prompt
    prompt: String,
    /// Generated response, or an error description on failure
    response: String,
    /// Request kind
    #[serde(rename = "type")]
    kind: RequestKind,
    /// When the interaction happened
    timestamp: DateTime<Utc>,
    /// Wall-clock processing time in milliseconds
    #[serde(rename = "processingTime")]
    #[builder(default)]
    processing_time_ms: Option<u64>,
    /// Model that produced the response
    #[builder(default)]
    model: Option<String>,
    /// Whether generation succeeded
    success: bool,
    /// Failure description, present when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    error: Option<String>,
    /// Search sources, present for search-grounded interactions
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    search_results: Option<Vec<SearchResult>>,
}

impl HistoryRecord {
    /// Replace the store-assigned id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
