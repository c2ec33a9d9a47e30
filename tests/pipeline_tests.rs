//! End-to-end pipeline tests: scan, aggregate, enrich, exclude.

use facematch::{
    MockComparator, MockCorpusStore, MockMetadataStore, ObjectStore, ScanOptions, enrich,
    exclude_identity, find_matches,
};

const PREFIX: &str = "profile_photos/";

struct Fixture {
    corpus: MockCorpusStore,
    comparator: MockComparator,
    metadata: MockMetadataStore,
}

impl Fixture {
    fn new() -> Self {
        Self {
            corpus: MockCorpusStore::new(),
            comparator: MockComparator::new(),
            metadata: MockMetadataStore::new(),
        }
    }

    /// Registers one identity with a photo and scripts its comparison.
    fn add_identity(&self, id: i64, name: &str, key: &str, bytes: &[u8], distance: f64) {
        self.corpus.insert(key, bytes);
        self.comparator.script(bytes, true, distance);
        self.metadata.insert(id, name, key);
    }
}

#[tokio::test]
async fn test_full_pipeline_returns_enriched_matches() {
    let fx = Fixture::new();
    fx.add_identity(7, "Ana Pérez", "profile_photos/A.jpg", b"face-a", 0.1);
    fx.add_identity(9, "Luis Gómez", "profile_photos/B.jpg", b"face-b", 0.5);

    let matches = find_matches(
        &fx.corpus,
        &fx.comparator,
        b"query",
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    // B.jpg is excluded: distance 0.5 >= threshold 0.4.
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate_ref, "profile_photos/A.jpg");
    assert_eq!(matches[0].similarity, 90.0);

    let enriched = enrich(&fx.metadata, &matches).await.unwrap();
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].identity_id, 7);
    assert_eq!(enriched[0].display_name, "Ana Pérez");
    assert_eq!(enriched[0].similarity, 90.0);
}

#[tokio::test]
async fn test_enrichment_never_invents_matches() {
    let fx = Fixture::new();
    fx.add_identity(1, "One", "profile_photos/1.jpg", b"f1", 0.1);
    fx.add_identity(2, "Two", "profile_photos/2.jpg", b"f2", 0.2);
    // A passing photo nobody owns.
    fx.corpus.insert("profile_photos/stray.jpg", b"stray");
    fx.comparator.script(b"stray", true, 0.15);

    let matches = find_matches(
        &fx.corpus,
        &fx.comparator,
        b"query",
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(matches.len(), 3);

    let enriched = enrich(&fx.metadata, &matches).await.unwrap();
    assert!(enriched.len() <= matches.len());
    assert_eq!(enriched.len(), 2);
}

#[tokio::test]
async fn test_zero_threshold_matches_nothing() {
    let fx = Fixture::new();
    fx.add_identity(1, "One", "profile_photos/1.jpg", b"f1", 0.0);

    let matches = find_matches(
        &fx.corpus,
        &fx.comparator,
        b"query",
        PREFIX,
        0.0,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_corrupt_candidate_does_not_reduce_other_matches() {
    let fx = Fixture::new();
    for i in 0..5 {
        fx.add_identity(
            i,
            &format!("Person {i}"),
            &format!("profile_photos/{i}.jpg"),
            format!("face-{i}").as_bytes(),
            0.1,
        );
    }
    fx.corpus.fail_fetch("profile_photos/2.jpg");

    let options = ScanOptions {
        fetch_retries: 0,
        ..ScanOptions::default()
    };
    let matches = find_matches(&fx.corpus, &fx.comparator, b"query", PREFIX, 0.4, options)
        .await
        .unwrap();

    assert_eq!(matches.len(), 4);
    assert!(
        !matches
            .iter()
            .any(|m| m.candidate_ref == "profile_photos/2.jpg")
    );
}

#[tokio::test]
async fn test_identity_never_matches_itself() {
    let fx = Fixture::new();
    fx.add_identity(7, "Ana Pérez", "profile_photos/self.jpg", b"self", 0.0);
    fx.add_identity(9, "Mia Pérez", "profile_photos/twin.jpg", b"twin", 0.2);

    // Compare-by-identity: the query is identity 7's own photo.
    let query = fx.corpus.fetch("profile_photos/self.jpg").await.unwrap();

    let matches = find_matches(
        &fx.corpus,
        &fx.comparator,
        &query,
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();
    let enriched = enrich(&fx.metadata, &matches).await.unwrap();
    let enriched = exclude_identity(enriched, 7);

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].identity_id, 9);
}
