//! Facematch library crate (used by the server binary and integration tests).
//!
//! Matches a query face image against a corpus of stored reference photos
//! and resolves the identities whose photos pass a distance threshold.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`ObjectStore`], [`S3CorpusStore`] - Photo corpus access
//! - [`FaceComparator`], [`HttpComparator`], [`Verification`] - Face
//!   comparison capability (external service, injected at the boundary)
//! - [`find_matches`], [`MatchResult`], [`ScanOptions`] - Scan and
//!   aggregation loop
//! - [`MetadataStore`], [`MySqlMetadataStore`], [`EnrichedMatch`] -
//!   Identity resolution
//! - [`gateway`] - Axum HTTP layer
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature =
//! "mock"))]`.

pub mod comparator;
pub mod config;
pub mod corpus;
pub mod gateway;
pub mod identity;
pub mod matcher;

pub use comparator::{ComparatorError, DEFAULT_MODEL, FaceComparator, HttpComparator, Verification};
#[cfg(any(test, feature = "mock"))]
pub use comparator::MockComparator;

pub use config::{Config, ConfigError};

pub use corpus::{CorpusError, ObjectStore, S3CorpusStore, fetch_with_retry};
#[cfg(any(test, feature = "mock"))]
pub use corpus::MockCorpusStore;

pub use gateway::{CompareByIdRequest, CompareResponse, GatewayError, HandlerState};

pub use identity::{
    EnrichedMatch, IdentityRecord, MetadataError, MetadataStore, MySqlMetadataStore, enrich,
    exclude_identity,
};
#[cfg(any(test, feature = "mock"))]
pub use identity::MockMetadataStore;

pub use matcher::{
    DEFAULT_SCAN_CONCURRENCY, DEFAULT_THRESHOLD, MatchError, MatchResult, ScanOptions,
    find_matches, is_match, similarity_from_distance,
};
