//! Firestore REST adapters.
//!
//! Talks to the Firestore v1 REST API directly: document writes for
//! appends, `runQuery` structured queries for listing, and batched
//! `commit` deletes for clears. Ownership is checked with a point read
//! before any delete-by-id.

mod value;

use crate::TokenProvider;
use async_trait::async_trait;
use cicero_core::{HistoryRecord, ProfileUpdate, UserProfile};
use cicero_error::{ConfigError, StorageError, StorageErrorKind};
use cicero_interface::{HistoryStore, ProfileStore};
use derive_getters::Getters;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const HISTORY_COLLECTION: &str = "chat_history";
const PROFILE_COLLECTION: &str = "users";

/// Firestore writes per commit batch (API limit).
const COMMIT_BATCH_SIZE: usize = 500;

/// Configuration for the Firestore adapters.
#[derive(Debug, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct FirestoreConfig {
    /// GCP project id
    project_id: String,
    /// API base URL, overridable for the emulator
    #[builder(default = "String::from(DEFAULT_BASE_URL)")]
    base_url: String,
}

impl FirestoreConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `FIREBASE_PROJECT_ID` (required)
    /// - `FIRESTORE_BASE_URL` (default: the public v1 endpoint)
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| ConfigError::new("FIREBASE_PROJECT_ID not set"))?;
        let base_url =
            std::env::var("FIRESTORE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(FirestoreConfigBuilder::default()
            .project_id(project_id)
            .base_url(base_url)
            .build()
            .expect("Valid FirestoreConfig"))
    }
}

/// Shared Firestore REST client.
#[derive(Debug)]
pub struct FirestoreClient {
    config: FirestoreConfig,
    tokens: TokenProvider,
    http: reqwest::Client,
}

impl FirestoreClient {
    /// Creates a client.
    pub fn new(config: FirestoreConfig, tokens: TokenProvider) -> Self {
        Self {
            config,
            tokens,
            http: reqwest::Client::new(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.base_url, self.config.project_id
        )
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.config.project_id, collection, id
        )
    }

    async fn request(
        &self,
        method: reqwest::Method,
        url: String,
        body: Option<Value>,
    ) -> Result<reqwest::Response, StorageError> {
        let token = self.tokens.token().await?;
        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Request(e.to_string())))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, StorageError> {
        response
            .json()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Request(e.to_string())))
    }

    /// Create a document, returning its store-assigned id.
    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, StorageError> {
        let url = format!("{}/{}", self.documents_url(), collection);
        let response = self
            .request(reqwest::Method::POST, url, Some(json!({ "fields": fields })))
            .await?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Request(format!(
                "create failed with status {}",
                response.status()
            ))));
        }
        let body = Self::read_json(response).await?;
        let name = body
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::new(StorageErrorKind::Request("no document name".into())))?;
        let id = name.rsplit('/').next().unwrap_or(name).to_string();
        Ok(id)
    }

    /// Point read. `Ok(None)` on 404.
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Map<String, Value>>, StorageError> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let response = self.request(reqwest::Method::GET, url, None).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Request(format!(
                "get failed with status {}",
                response.status()
            ))));
        }
        let body = Self::read_json(response).await?;
        Ok(body
            .get("fields")
            .and_then(Value::as_object)
            .cloned()
            .or_else(|| Some(Map::new())))
    }

    /// Create or replace a document at a known id.
    async fn put(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StorageError> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let response = self
            .request(
                reqwest::Method::PATCH,
                url,
                Some(json!({ "fields": fields })),
            )
            .await?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Request(format!(
                "put failed with status {}",
                response.status()
            ))));
        }
        Ok(())
    }

    /// Structured query against one collection, filtered by a string field.
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        equals: &str,
        order_desc_by: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<(String, Map<String, Value>)>, StorageError> {
        let mut query = json!({
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": { "stringValue": equals },
                }
            },
        });
        if let Some(order_field) = order_desc_by {
            query["orderBy"] = json!([{
                "field": { "fieldPath": order_field },
                "direction": "DESCENDING",
            }]);
        }
        if let Some(limit) = limit {
            query["limit"] = json!(limit);
        }

        let url = format!("{}:runQuery", self.documents_url());
        let response = self
            .request(
                reqwest::Method::POST,
                url,
                Some(json!({ "structuredQuery": query })),
            )
            .await?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Request(format!(
                "query failed with status {}",
                response.status()
            ))));
        }

        let body = Self::read_json(response).await?;
        let rows = body.as_array().cloned().unwrap_or_default();
        let mut documents = Vec::new();
        for row in rows {
            let Some(document) = row.get("document") else {
                continue;
            };
            let Some(name) = document.get("name").and_then(Value::as_str) else {
                continue;
            };
            let id = name.rsplit('/').next().unwrap_or(name).to_string();
            let fields = document
                .get("fields")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            documents.push((id, fields));
        }
        Ok(documents)
    }

    /// Delete documents in commit batches of at most 500 writes.
    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StorageError> {
        let url = format!("{}:commit", self.documents_url());
        for batch in ids.chunks(COMMIT_BATCH_SIZE) {
            let writes: Vec<Value> = batch
                .iter()
                .map(|id| json!({ "delete": self.document_name(collection, id) }))
                .collect();
            let response = self
                .request(
                    reqwest::Method::POST,
                    url.clone(),
                    Some(json!({ "writes": writes })),
                )
                .await?;
            if !response.status().is_success() {
                return Err(StorageError::new(StorageErrorKind::Request(format!(
                    "batch delete failed with status {}",
                    response.status()
                ))));
            }
        }
        Ok(())
    }

    /// Delete one document.
    async fn delete_one(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        let url = format!("{}/{}/{}", self.documents_url(), collection, id);
        let response = self.request(reqwest::Method::DELETE, url, None).await?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Request(format!(
                "delete failed with status {}",
                response.status()
            ))));
        }
        Ok(())
    }
}

/// History collection backed by Firestore.
#[derive(Debug, Clone)]
pub struct FirestoreHistoryStore {
    client: Arc<FirestoreClient>,
}

impl FirestoreHistoryStore {
    /// Creates a store over a shared client.
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HistoryStore for FirestoreHistoryStore {
    #[instrument(skip(self, record), fields(user_id = %record.user_id()))]
    async fn append(&self, record: HistoryRecord) -> Result<String, StorageError> {
        let fields = value::history_to_fields(&record);
        let id = self.client.create(HISTORY_COLLECTION, fields).await?;
        debug!(id, "Appended history record");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryRecord>, StorageError> {
        let documents = self
            .client
            .query_by_field(
                HISTORY_COLLECTION,
                "userId",
                user_id,
                Some("timestamp"),
                Some(limit),
            )
            .await?;
        documents
            .iter()
            .map(|(id, fields)| value::history_from_fields(id, fields))
            .collect()
    }

    #[instrument(skip(self))]
    async fn clear(&self, user_id: &str) -> Result<usize, StorageError> {
        let documents = self
            .client
            .query_by_field(HISTORY_COLLECTION, "userId", user_id, None, None)
            .await?;
        let ids: Vec<String> = documents.into_iter().map(|(id, _)| id).collect();
        self.client.delete_batch(HISTORY_COLLECTION, &ids).await?;
        Ok(ids.len())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StorageError> {
        let fields = self
            .client
            .get(HISTORY_COLLECTION, id)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;
        let record = value::history_from_fields(id, &fields)?;
        if record.user_id() != user_id {
            return Err(StorageError::new(StorageErrorKind::AccessDenied(
                id.to_string(),
            )));
        }
        self.client.delete_one(HISTORY_COLLECTION, id).await
    }
}

/// Profile collection backed by Firestore, keyed by uid.
#[derive(Debug, Clone)]
pub struct FirestoreProfileStore {
    client: Arc<FirestoreClient>,
}

impl FirestoreProfileStore {
    /// Creates a store over a shared client.
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileStore for FirestoreProfileStore {
    #[instrument(skip(self))]
    async fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, StorageError> {
        match self.client.get(PROFILE_COLLECTION, uid).await? {
            Some(fields) => Ok(Some(value::profile_from_fields(uid, &fields)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, profile))]
    async fn put(&self, profile: UserProfile) -> Result<(), StorageError> {
        let fields = value::profile_to_fields(&profile);
        self.client
            .put(PROFILE_COLLECTION, profile.uid(), fields)
            .await
    }

    #[instrument(skip(self, update))]
    async fn update(&self, uid: &str, update: ProfileUpdate) -> Result<(), StorageError> {
        let mut profile = self
            .fetch(uid)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(uid.to_string())))?;
        profile.apply(update);
        self.put(profile).await
    }
}
