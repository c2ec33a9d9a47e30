use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::ObjectStore;
use super::error::CorpusError;

const MOCK_BUCKET: &str = "mock";

/// In-memory object store for tests. Listing order is the key order
/// (BTreeMap), so scan order is deterministic.
#[derive(Default)]
pub struct MockCorpusStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    failing_keys: RwLock<HashSet<String>>,
    listing_down: AtomicBool,
}

impl MockCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object under `key`.
    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects
            .write()
            .expect("mock lock poisoned")
            .insert(key.to_string(), bytes.to_vec());
    }

    /// Makes every subsequent `fetch` of `key` fail.
    pub fn fail_fetch(&self, key: &str) {
        self.failing_keys
            .write()
            .expect("mock lock poisoned")
            .insert(key.to_string());
    }

    /// Makes every subsequent `list_keys` call fail.
    pub fn fail_listing(&self) {
        self.listing_down.store(true, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().expect("mock lock poisoned").len()
    }
}

impl ObjectStore for MockCorpusStore {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, CorpusError> {
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(CorpusError::ListFailed {
                bucket: MOCK_BUCKET.to_string(),
                prefix: prefix.to_string(),
                message: "listing unavailable".to_string(),
            });
        }

        let objects = self
            .objects
            .read()
            .map_err(|_| CorpusError::ListFailed {
                bucket: MOCK_BUCKET.to_string(),
                prefix: prefix.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        Ok(objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>, CorpusError> {
        let failing = self
            .failing_keys
            .read()
            .map_err(|_| CorpusError::FetchFailed {
                bucket: MOCK_BUCKET.to_string(),
                key: key.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        if failing.contains(key) {
            return Err(CorpusError::FetchFailed {
                bucket: MOCK_BUCKET.to_string(),
                key: key.to_string(),
                message: "injected fetch failure".to_string(),
            });
        }
        drop(failing);

        let objects = self
            .objects
            .read()
            .map_err(|_| CorpusError::FetchFailed {
                bucket: MOCK_BUCKET.to_string(),
                key: key.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        objects
            .get(key)
            .cloned()
            .ok_or_else(|| CorpusError::FetchFailed {
                bucket: MOCK_BUCKET.to_string(),
                key: key.to_string(),
                message: "no such object".to_string(),
            })
    }
}
