use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::MetadataError;
use super::{IdentityRecord, MetadataStore};

/// In-memory metadata store for tests.
#[derive(Default)]
pub struct MockMetadataStore {
    records: RwLock<Vec<IdentityRecord>>,
    down: AtomicBool,
}

impl MockMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity owning one photo path.
    pub fn insert(&self, identity_id: i64, display_name: &str, photo_path: &str) {
        self.records
            .write()
            .expect("mock lock poisoned")
            .push(IdentityRecord {
                identity_id,
                display_name: display_name.to_string(),
                photo_path: photo_path.to_string(),
            });
    }

    /// Makes every subsequent query fail as a connectivity error.
    pub fn set_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), MetadataError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(MetadataError::ConnectionFailed {
                url: "mock".to_string(),
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl MetadataStore for MockMetadataStore {
    async fn owners_of_photos(
        &self,
        paths: &[String],
    ) -> Result<Vec<IdentityRecord>, MetadataError> {
        self.check_up()?;

        let records = self
            .records
            .read()
            .map_err(|_| MetadataError::QueryFailed {
                message: "lock poisoned".to_string(),
            })?;

        Ok(records
            .iter()
            .filter(|r| paths.contains(&r.photo_path))
            .cloned()
            .collect())
    }

    async fn reference_photo(&self, identity_id: i64) -> Result<Option<String>, MetadataError> {
        self.check_up()?;

        let records = self
            .records
            .read()
            .map_err(|_| MetadataError::QueryFailed {
                message: "lock poisoned".to_string(),
            })?;

        Ok(records
            .iter()
            .find(|r| r.identity_id == identity_id)
            .map(|r| r.photo_path.clone()))
    }
}
