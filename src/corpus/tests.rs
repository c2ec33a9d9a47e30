use super::*;

#[tokio::test]
async fn test_mock_store_lists_only_prefixed_keys() {
    let store = MockCorpusStore::new();
    store.insert("profile_photos/a.jpg", b"a");
    store.insert("profile_photos/b.jpg", b"b");
    store.insert("other/c.jpg", b"c");

    let keys = store.list_keys("profile_photos/").await.unwrap();
    assert_eq!(keys, vec!["profile_photos/a.jpg", "profile_photos/b.jpg"]);
}

#[tokio::test]
async fn test_empty_listing_is_success() {
    let store = MockCorpusStore::new();
    let keys = store.list_keys("profile_photos/").await.unwrap();
    assert!(keys.is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_distinct_from_empty() {
    let store = MockCorpusStore::new();
    store.fail_listing();

    let err = store.list_keys("profile_photos/").await.unwrap_err();
    assert!(matches!(err, CorpusError::ListFailed { .. }));
}

#[tokio::test]
async fn test_fetch_missing_key_fails() {
    let store = MockCorpusStore::new();
    let err = store.fetch("profile_photos/nope.jpg").await.unwrap_err();
    assert!(matches!(err, CorpusError::FetchFailed { .. }));
}

#[tokio::test]
async fn test_fetch_with_retry_gives_up_after_retries() {
    let store = MockCorpusStore::new();
    store.insert("profile_photos/a.jpg", b"a");
    store.fail_fetch("profile_photos/a.jpg");

    let err = fetch_with_retry(&store, "profile_photos/a.jpg", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CorpusError::FetchFailed { .. }));
}

#[tokio::test]
async fn test_fetch_with_retry_returns_bytes() {
    let store = MockCorpusStore::new();
    store.insert("profile_photos/a.jpg", b"payload");

    let bytes = fetch_with_retry(&store, "profile_photos/a.jpg", 2)
        .await
        .unwrap();
    assert_eq!(bytes, b"payload");
}
