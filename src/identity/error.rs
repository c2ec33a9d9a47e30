use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the identity metadata store.
///
/// These are batch-level conditions. A matched photo path with no owning
/// identity is not an error; that match is simply dropped.
pub enum MetadataError {
    /// Could not connect to the metadata database.
    #[error("failed to connect to metadata store at '{url}': {message}")]
    ConnectionFailed {
        /// Database URL (credentials redacted by the caller).
        url: String,
        /// Error message.
        message: String,
    },

    /// A query against the metadata store failed.
    #[error("metadata query failed: {message}")]
    QueryFailed {
        /// Error message.
        message: String,
    },
}
