//! Document store seams.

use async_trait::async_trait;
use cicero_core::{HistoryRecord, ProfileUpdate, UserProfile};
use cicero_error::StorageError;

/// Append-only interaction history, paginated descending by timestamp.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist one record, returning the store-assigned document id.
    async fn append(&self, record: HistoryRecord) -> Result<String, StorageError>;

    /// List a user's records, newest first, up to `limit`.
    async fn list(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryRecord>, StorageError>;

    /// Delete all records for a user, returning the count removed.
    async fn clear(&self, user_id: &str) -> Result<usize, StorageError>;

    /// Delete one record after an ownership check.
    ///
    /// Fails with `StorageErrorKind::NotFound` when the id does not exist
    /// and `StorageErrorKind::AccessDenied` when the record belongs to a
    /// different user; no document is removed in either case.
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StorageError>;
}

/// User profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile, if it exists.
    async fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, StorageError>;

    /// Create or replace a profile.
    async fn put(&self, profile: UserProfile) -> Result<(), StorageError>;

    /// Apply a partial update to an existing profile.
    async fn update(&self, uid: &str, update: ProfileUpdate) -> Result<(), StorageError>;
}
