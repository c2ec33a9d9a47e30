//! Identity resolution against the metadata store.
//!
//! Joins passing match results to their owning person records. Enrichment
//! only ever filters: a matched photo path with no owning identity is
//! dropped, never invented.

pub mod error;
pub mod mock;
pub mod store;


pub use error::MetadataError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockMetadataStore;
pub use store::MySqlMetadataStore;

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::matcher::MatchResult;

/// One person record joined to a reference photo path.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    pub identity_id: i64,
    /// Composed full name (name + surname).
    pub display_name: String,
    /// Storage key of the owned reference photo.
    pub photo_path: String,
}

/// A match result joined to its owning identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMatch {
    pub identity_id: i64,
    pub display_name: String,
    pub candidate_ref: String,
    pub similarity: f64,
}

/// Async interface to the identity metadata store.
pub trait MetadataStore: Send + Sync {
    /// Resolves the owning identity of each photo path, in one batched
    /// query. Paths with no owner are simply absent from the result.
    fn owners_of_photos(
        &self,
        paths: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<IdentityRecord>, MetadataError>> + Send;

    /// Looks up an identity's reference photo path, if it has one on record.
    fn reference_photo(
        &self,
        identity_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<String>, MetadataError>> + Send;
}

/// Joins match results to identity records, preserving match order.
///
/// Matches whose photo path has no owning identity are dropped. A store
/// error fails the whole batch; that is a coarser condition than a missing
/// row and must surface to the caller.
pub async fn enrich<M: MetadataStore>(
    store: &M,
    matches: &[MatchResult],
) -> Result<Vec<EnrichedMatch>, MetadataError> {
    if matches.is_empty() {
        return Ok(Vec::new());
    }

    let paths: Vec<String> = matches.iter().map(|m| m.candidate_ref.clone()).collect();
    let records = store.owners_of_photos(&paths).await?;

    let by_path: HashMap<&str, &IdentityRecord> = records
        .iter()
        .map(|r| (r.photo_path.as_str(), r))
        .collect();

    let mut enriched = Vec::with_capacity(matches.len());
    for m in matches {
        match by_path.get(m.candidate_ref.as_str()) {
            Some(record) => enriched.push(EnrichedMatch {
                identity_id: record.identity_id,
                display_name: record.display_name.clone(),
                candidate_ref: m.candidate_ref.clone(),
                similarity: m.similarity,
            }),
            None => {
                debug!(candidate_ref = %m.candidate_ref, "dropping match with no owning identity");
            }
        }
    }

    Ok(enriched)
}

/// Removes `identity_id` from `matches`, so an identity never appears as
/// its own match in the compare-by-identity workflow.
pub fn exclude_identity(matches: Vec<EnrichedMatch>, identity_id: i64) -> Vec<EnrichedMatch> {
    matches
        .into_iter()
        .filter(|m| m.identity_id != identity_id)
        .collect()
}
