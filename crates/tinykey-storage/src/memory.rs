use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tinykey_core::store::Result;
use tinykey_core::{ShortKey, StoreError, UrlRecord, UrlStore};

/// In-memory implementation of the [`UrlStore`] trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API, which holds
/// the shard lock across the check and the write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes every record. Intended for test setup.
    pub fn clear(&self) {
        self.storage.clear();
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save(&self, key: &ShortKey, long_url: &str) -> Result<()> {
        match self.storage.entry(key.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(key.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(UrlRecord {
                    short_key: key.clone(),
                    long_url: long_url.to_owned(),
                    created_at: Timestamp::now(),
                });
                Ok(())
            }
        }
    }

    async fn find(&self, key: &ShortKey) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(key.as_str())
            .map(|record| record.long_url.clone()))
    }

    async fn find_record(&self, key: &ShortKey) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(key.as_str()).map(|record| record.clone()))
    }

    async fn exists(&self, key: &ShortKey) -> Result<bool> {
        Ok(self.storage.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(s: &str) -> ShortKey {
        ShortKey::new_unchecked(s)
    }

    #[tokio::test]
    async fn save_and_find() {
        let store = InMemoryStore::new();

        store
            .save(&key("abc123"), "https://example.com")
            .await
            .unwrap();

        let found = store.find(&key("abc123")).await.unwrap();
        assert_eq!(found.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.find(&key("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_key_keeps_first_url() {
        let store = InMemoryStore::new();

        store
            .save(&key("abc123"), "https://first.com")
            .await
            .unwrap();

        let err = store
            .save(&key("abc123"), "https://second.com")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(
            store.find(&key("abc123")).await.unwrap().as_deref(),
            Some("https://first.com")
        );
    }

    #[tokio::test]
    async fn keys_are_case_sensitive() {
        let store = InMemoryStore::new();

        store.save(&key("abc"), "https://lower.com").await.unwrap();
        store.save(&key("ABC"), "https://upper.com").await.unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn record_carries_created_at() {
        let store = InMemoryStore::new();
        let before = Timestamp::now();

        store.save(&key("abc123"), "https://example.com").await.unwrap();

        let record = store.find_record(&key("abc123")).await.unwrap().unwrap();
        assert_eq!(record.short_key, key("abc123"));
        assert_eq!(record.long_url, "https://example.com");
        assert!(record.created_at >= before);
        assert!(record.created_at <= Timestamp::now());
    }

    #[tokio::test]
    async fn exists_checks() {
        let store = InMemoryStore::new();

        assert!(!store.exists(&key("abc123")).await.unwrap());

        store.save(&key("abc123"), "https://example.com").await.unwrap();

        assert!(store.exists(&key("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let store = InMemoryStore::new();
        store.save(&key("abc123"), "https://example.com").await.unwrap();

        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        assert!(store.exists(&key("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = InMemoryStore::with_capacity(4);
        store.save(&key("a"), "https://a.com").await.unwrap();
        store.save(&key("b"), "https://b.com").await.unwrap();

        store.clear();

        assert!(store.is_empty());
        assert!(store.find(&key("a")).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_of_one_key_have_a_single_winner() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..32u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save(&key("race"), &format!("https://example{}.com", i))
                    .await
            }));
        }

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(StoreError::DuplicateKey(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 31);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let k = ShortKey::new_unchecked(format!("key{:03}", i));
                store
                    .save(&k, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let k = ShortKey::new_unchecked(format!("key{:03}", i));
            let found = store.find(&k).await.unwrap().unwrap();
            assert_eq!(found, format!("https://example{}.com", i));
        }
    }
}
