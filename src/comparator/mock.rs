use std::collections::HashMap;
use std::sync::RwLock;

use super::error::ComparatorError;
use super::{FaceComparator, Verification};

/// Scripted comparator for tests, keyed by candidate image bytes.
///
/// Unknown candidates compare as not-verified at distance 1.0.
#[derive(Default)]
pub struct MockComparator {
    outcomes: RwLock<HashMap<Vec<u8>, Result<Verification, String>>>,
}

impl MockComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the verification returned for `candidate`.
    pub fn script(&self, candidate: &[u8], verified: bool, distance: f64) {
        self.outcomes
            .write()
            .expect("mock lock poisoned")
            .insert(candidate.to_vec(), Ok(Verification { verified, distance }));
    }

    /// Scripts a comparison failure for `candidate`.
    pub fn script_failure(&self, candidate: &[u8], message: &str) {
        self.outcomes
            .write()
            .expect("mock lock poisoned")
            .insert(candidate.to_vec(), Err(message.to_string()));
    }
}

impl FaceComparator for MockComparator {
    async fn verify(
        &self,
        _query: &[u8],
        candidate: &[u8],
    ) -> Result<Verification, ComparatorError> {
        let outcomes = self
            .outcomes
            .read()
            .map_err(|_| ComparatorError::InvalidResponse {
                message: "lock poisoned".to_string(),
            })?;

        match outcomes.get(candidate) {
            Some(Ok(verification)) => Ok(*verification),
            Some(Err(message)) => Err(ComparatorError::ServiceError {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(Verification {
                verified: false,
                distance: 1.0,
            }),
        }
    }
}
