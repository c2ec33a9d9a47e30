use thiserror::Error;

use crate::corpus::CorpusError;

#[derive(Debug, Error)]
/// Errors that abort an entire match scan.
///
/// Per-candidate fetch and comparison failures are deliberately absent:
/// those are logged and swallowed inside the scan loop.
pub enum MatchError {
    /// The corpus namespace could not be enumerated.
    #[error("corpus unavailable: {0}")]
    StorageUnavailable(#[from] CorpusError),
}
