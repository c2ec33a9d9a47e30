use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by object storage operations.
pub enum CorpusError {
    /// Enumerating the corpus namespace failed. Fatal to the whole match
    /// attempt, as opposed to an empty listing (which is a valid result).
    #[error("failed to list corpus under '{prefix}' in bucket '{bucket}': {message}")]
    ListFailed {
        /// Bucket name.
        bucket: String,
        /// Key prefix being enumerated.
        prefix: String,
        /// Error message.
        message: String,
    },

    /// Fetching a single object failed.
    #[error("failed to fetch object '{key}' from bucket '{bucket}': {message}")]
    FetchFailed {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Reading the object body failed after the request succeeded.
    #[error("failed to read body of object '{key}': {message}")]
    ReadFailed {
        /// Object key.
        key: String,
        /// Error message.
        message: String,
    },
}
