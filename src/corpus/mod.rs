//! Reference photo corpus access (S3-compatible object storage).

pub mod client;
pub mod error;
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::S3CorpusStore;
pub use error::CorpusError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCorpusStore;

use std::time::Duration;

/// Base delay between fetch retry attempts; attempt `n` waits `n` times this.
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Minimal async interface over the photo corpus, used by the matcher.
///
/// Listing a namespace must be restartable (each call re-enumerates) and
/// carries no ordering guarantee. An empty listing is success.
pub trait ObjectStore: Send + Sync {
    /// Enumerates every object key under `prefix`.
    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, CorpusError>> + Send;

    /// Fetches the raw bytes of one object.
    fn fetch(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, CorpusError>> + Send;
}

/// Fetches `key`, retrying transient failures up to `retries` times with
/// linear backoff before giving up.
pub async fn fetch_with_retry<S: ObjectStore>(
    store: &S,
    key: &str,
    retries: u32,
) -> Result<Vec<u8>, CorpusError> {
    let mut attempt = 0u32;
    loop {
        match store.fetch(key).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) if attempt < retries => {
                attempt += 1;
                tracing::debug!(key, attempt, error = %e, "retrying candidate fetch");
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
            Err(e) => return Err(e),
        }
    }
}
