//! In-memory store implementations.
//!
//! Used by tests and by dev deployments without Firestore credentials.
//! Semantics match the Firestore adapters: descending-timestamp listing,
//! ownership checks before point deletes.

use async_trait::async_trait;
use cicero_core::{HistoryRecord, ProfileUpdate, UserProfile};
use cicero_error::{StorageError, StorageErrorKind};
use cicero_interface::{HistoryStore, ProfileStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory history collection.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<String, StorageError> {
        let id = uuid::Uuid::new_v4().to_string();
        let record = record.with_id(id.clone());
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn list(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryRecord>, StorageError> {
        let records = self.records.read().await;
        let mut matching: Vec<HistoryRecord> = records
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp().cmp(a.timestamp()));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn clear(&self, user_id: &str) -> Result<usize, StorageError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.user_id() != user_id);
        Ok(before - records.len())
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StorageError> {
        let mut records = self.records.write().await;
        let record = records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;
        if record.user_id() != user_id {
            return Err(StorageError::new(StorageErrorKind::AccessDenied(
                id.to_string(),
            )));
        }
        records.retain(|r| r.id() != id);
        Ok(())
    }
}

/// In-memory profile collection keyed by uid.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, StorageError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn put(&self, profile: UserProfile) -> Result<(), StorageError> {
        self.profiles
            .write()
            .await
            .insert(profile.uid().clone(), profile);
        Ok(())
    }

    async fn update(&self, uid: &str, update: ProfileUpdate) -> Result<(), StorageError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(uid.to_string())))?;
        profile.apply(update);
        Ok(())
    }
}
