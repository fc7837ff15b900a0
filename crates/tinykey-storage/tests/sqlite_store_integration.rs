use jiff::Timestamp;
use tinykey_core::ShortKey;
use tinykey_storage::{SqliteStore, StoreError, UrlStore};

async fn store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.expect("open sqlite");
    store.initialize().await.expect("create schema");
    store
}

fn key(value: &str) -> ShortKey {
    ShortKey::new_unchecked(value)
}

#[tokio::test]
async fn save_and_find() {
    let store = store().await;

    store
        .save(&key("abc123"), "https://example.com")
        .await
        .unwrap();

    let got = store.find(&key("abc123")).await.unwrap();
    assert_eq!(got.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn find_returns_none_for_unknown_key() {
    let store = store().await;

    assert!(store.find(&key("MISSING")).await.unwrap().is_none());
    assert!(!store.exists(&key("MISSING")).await.unwrap());
}

#[tokio::test]
async fn duplicate_key_is_rejected_and_first_url_kept() {
    let store = store().await;

    store
        .save(&key("Unique2"), "https://one.example")
        .await
        .unwrap();

    let err = store
        .save(&key("Unique2"), "https://two.example")
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::DuplicateKey(_)));
    assert_eq!(
        store.find(&key("Unique2")).await.unwrap().as_deref(),
        Some("https://one.example")
    );
}

#[tokio::test]
async fn initialize_twice_keeps_data() {
    let store = store().await;
    store
        .save(&key("keep"), "https://example.com")
        .await
        .unwrap();

    store.initialize().await.unwrap();

    assert!(store.exists(&key("keep")).await.unwrap());
}

#[tokio::test]
async fn created_at_is_assigned_by_the_store() {
    let store = store().await;
    let before = Timestamp::now().as_second();

    store
        .save(&key("stamp"), "https://example.com")
        .await
        .unwrap();

    let record = store.find_record(&key("stamp")).await.unwrap().unwrap();
    assert_eq!(record.short_key, key("stamp"));
    assert_eq!(record.long_url, "https://example.com");
    assert!(record.created_at.as_second() >= before);
    assert!(record.created_at.as_second() <= Timestamp::now().as_second());
}

#[tokio::test]
async fn keys_are_case_sensitive() {
    let store = store().await;

    store.save(&key("abc"), "https://lower.com").await.unwrap();
    store.save(&key("ABC"), "https://upper.com").await.unwrap();

    assert_eq!(
        store.find(&key("ABC")).await.unwrap().as_deref(),
        Some("https://upper.com")
    );
}

#[tokio::test]
async fn closed_pool_is_reported_as_unavailable() {
    let store = store().await;
    store.pool().close().await;

    let err = store.find(&key("abc123")).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));

    let err = store
        .save(&key("abc123"), "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
