use crate::error::StoreError;
use crate::key::ShortKey;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A persisted mapping from a short key to a long URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub short_key: ShortKey,
    pub long_url: String,
    /// Assigned by the store at insertion, never updated.
    pub created_at: Timestamp,
}

/// Durable short key to URL mapping with uniqueness enforcement.
///
/// Each call is independent: implementations must not share a single
/// connection across concurrent operations, and must report connectivity
/// failures as errors rather than as an absent key.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Ensures the backing schema exists. Safe to call on every start.
    async fn initialize(&self) -> Result<()>;

    /// Inserts a new record.
    ///
    /// Returns `Err(StoreError::DuplicateKey)` if the key is already taken.
    /// Concurrent saves of the same key resolve to exactly one success.
    async fn save(&self, key: &ShortKey, long_url: &str) -> Result<()>;

    /// Returns the long URL stored under `key`, or `None` if there is none.
    async fn find(&self, key: &ShortKey) -> Result<Option<String>> {
        Ok(self.find_record(key).await?.map(|record| record.long_url))
    }

    /// Returns the full record stored under `key`.
    async fn find_record(&self, key: &ShortKey) -> Result<Option<UrlRecord>>;

    /// Checks whether `key` is taken.
    ///
    /// Advisory only: the constraint checked by [`UrlStore::save`] is
    /// the authoritative answer.
    async fn exists(&self, key: &ShortKey) -> Result<bool> {
        Ok(self.find(key).await?.is_some())
    }
}
