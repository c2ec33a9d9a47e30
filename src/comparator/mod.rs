//! Face comparison capability.
//!
//! The embedding model and distance computation live in an external service;
//! this module only defines the boundary and an HTTP client for it.

pub mod client;
pub mod error;
pub mod mock;

pub use client::HttpComparator;
pub use error::ComparatorError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockComparator;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "Facenet";

/// Outcome of comparing two face images.
///
/// `distance` is a dissimilarity score; lower means more similar. `verified`
/// is the capability's own same-person judgement, independent of any
/// caller-supplied threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    pub verified: bool,
    pub distance: f64,
}

/// Async interface to the face comparison capability.
pub trait FaceComparator: Send + Sync {
    /// Compares a query image against one candidate image.
    fn verify(
        &self,
        query: &[u8],
        candidate: &[u8],
    ) -> impl std::future::Future<Output = Result<Verification, ComparatorError>> + Send;
}
