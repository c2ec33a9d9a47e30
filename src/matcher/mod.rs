//! Match evaluation and aggregation.
//!
//! Drives the corpus scan, compares every candidate against the query image
//! through the [`FaceComparator`] capability, and collects the candidates
//! that pass the distance threshold. Candidates are evaluated through a
//! bounded concurrent pool; each candidate's failure is isolated, so one
//! unreadable photo never blocks matching against the rest of the corpus.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::MatchError;

use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use tracing::{debug, warn};

use crate::comparator::FaceComparator;
use crate::corpus::{ObjectStore, fetch_with_retry};

/// Distance threshold applied when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Default width of the concurrent evaluation pool.
pub const DEFAULT_SCAN_CONCURRENCY: usize = 4;

/// One candidate photo that passed the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Storage key of the matching reference photo.
    pub candidate_ref: String,
    /// Normalized similarity percentage in `[0, 100]`.
    pub similarity: f64,
}

/// Per-scan knobs for the aggregation loop.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Maximum candidate evaluations in flight at once.
    pub concurrency: usize,
    /// Retries for a transient candidate fetch before it counts as a
    /// per-candidate failure.
    pub fetch_retries: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_SCAN_CONCURRENCY,
            fetch_retries: 2,
        }
    }
}

/// Converts a comparator distance into a similarity percentage.
///
/// `max(0, 1 - distance) * 100`, clamped to `[0, 100]` and rounded to two
/// decimal places for external reporting.
pub fn similarity_from_distance(distance: f64) -> f64 {
    let pct = ((1.0 - distance).max(0.0) * 100.0).min(100.0);
    (pct * 100.0).round() / 100.0
}

/// A candidate matches iff the capability verified it AND its distance is
/// strictly below the threshold. A threshold of zero can never match.
pub fn is_match(verified: bool, distance: f64, threshold: f64) -> bool {
    verified && distance < threshold
}

/// Evaluates one candidate against the query image.
///
/// Any fetch or comparison error is logged and becomes a no-match; it must
/// never abort the surrounding scan.
async fn evaluate_candidate<S, C>(
    corpus: &S,
    comparator: &C,
    query: &[u8],
    key: &str,
    threshold: f64,
    fetch_retries: u32,
) -> Option<MatchResult>
where
    S: ObjectStore,
    C: FaceComparator,
{
    let candidate = match fetch_with_retry(corpus, key, fetch_retries).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key, error = %e, "skipping candidate: fetch failed");
            return None;
        }
    };

    let verification = match comparator.verify(query, &candidate).await {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "skipping candidate: comparison failed");
            return None;
        }
    };

    if !is_match(verification.verified, verification.distance, threshold) {
        return None;
    }

    Some(MatchResult {
        candidate_ref: key.to_string(),
        similarity: similarity_from_distance(verification.distance),
    })
}

/// Scans the corpus under `prefix` and returns every candidate that matches
/// `query` at `threshold`, in scan-enumeration order.
///
/// An empty result is success ("no matches found"), distinct from
/// [`MatchError::StorageUnavailable`] when the corpus cannot be listed at
/// all. Cancellation is cooperative: dropping the returned future stops
/// scheduling new evaluations.
pub async fn find_matches<S, C>(
    corpus: &S,
    comparator: &C,
    query: &[u8],
    prefix: &str,
    threshold: f64,
    options: ScanOptions,
) -> Result<Vec<MatchResult>, MatchError>
where
    S: ObjectStore,
    C: FaceComparator,
{
    let keys = corpus.list_keys(prefix).await?;
    debug!(candidates = keys.len(), threshold, "scanning corpus");

    let fetch_retries = options.fetch_retries;
    let evaluations: Vec<_> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| async move {
            evaluate_candidate(corpus, comparator, query, key, threshold, fetch_retries)
                .await
                .map(|m| (index, m))
        })
        .collect();
    let mut indexed: Vec<(usize, MatchResult)> = stream::iter(evaluations)
        .buffer_unordered(options.concurrency.max(1))
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await;

    // buffer_unordered yields in completion order; report in scan order.
    indexed.sort_by_key(|(index, _)| *index);

    let matches: Vec<MatchResult> = indexed.into_iter().map(|(_, m)| m).collect();
    debug!(matches = matches.len(), "corpus scan complete");
    Ok(matches)
}
