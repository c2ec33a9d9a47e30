use std::sync::Arc;

use crate::comparator::FaceComparator;
use crate::corpus::ObjectStore;
use crate::identity::MetadataStore;
use crate::matcher::ScanOptions;

/// Shared state for the gateway handlers.
///
/// Collaborators are injected as trait implementations so tests can swap in
/// mocks without a running object store, database, or comparator service.
pub struct HandlerState<S, C, M> {
    pub corpus: Arc<S>,
    pub comparator: Arc<C>,
    pub metadata: Arc<M>,
    /// Key prefix the corpus lives under.
    pub corpus_prefix: Arc<str>,
    /// Threshold applied when the request carries none.
    pub default_threshold: f64,
    /// Upload size cap in bytes.
    pub max_upload_bytes: usize,
    pub scan: ScanOptions,
}

impl<S, C, M> HandlerState<S, C, M>
where
    S: ObjectStore,
    C: FaceComparator,
    M: MetadataStore,
{
    pub fn new(
        corpus: Arc<S>,
        comparator: Arc<C>,
        metadata: Arc<M>,
        corpus_prefix: &str,
        default_threshold: f64,
        max_upload_bytes: usize,
        scan: ScanOptions,
    ) -> Self {
        Self {
            corpus,
            comparator,
            metadata,
            corpus_prefix: Arc::from(corpus_prefix),
            default_threshold,
            max_upload_bytes,
            scan,
        }
    }
}

// Manual impl: `derive(Clone)` would demand Clone on S, C, M even though
// only the Arcs are cloned.
impl<S, C, M> Clone for HandlerState<S, C, M> {
    fn clone(&self) -> Self {
        Self {
            corpus: Arc::clone(&self.corpus),
            comparator: Arc::clone(&self.comparator),
            metadata: Arc::clone(&self.metadata),
            corpus_prefix: Arc::clone(&self.corpus_prefix),
            default_threshold: self.default_threshold,
            max_upload_bytes: self.max_upload_bytes,
            scan: self.scan,
        }
    }
}
