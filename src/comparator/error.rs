use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the face comparison capability.
pub enum ComparatorError {
    /// The comparator service could not be reached.
    #[error("comparator request to '{url}' failed: {message}")]
    RequestFailed {
        /// Service URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The comparator service answered with a non-success status.
    #[error("comparator returned status {status}: {message}")]
    ServiceError {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The comparator response could not be decoded.
    #[error("failed to decode comparator response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
