use super::*;
use crate::comparator::MockComparator;
use crate::corpus::MockCorpusStore;

const PREFIX: &str = "profile_photos/";

fn corpus_with(entries: &[(&str, &[u8])]) -> MockCorpusStore {
    let store = MockCorpusStore::new();
    for (key, bytes) in entries {
        store.insert(key, bytes);
    }
    store
}

#[test]
fn test_similarity_formula() {
    assert_eq!(similarity_from_distance(0.1), 90.0);
    assert_eq!(similarity_from_distance(0.0), 100.0);
    assert_eq!(similarity_from_distance(1.0), 0.0);
    assert_eq!(similarity_from_distance(0.333), 66.7);
}

#[test]
fn test_similarity_clamps_out_of_range_distances() {
    // Distances above 1 floor at zero; negative distances cap at 100.
    assert_eq!(similarity_from_distance(1.5), 0.0);
    assert_eq!(similarity_from_distance(-0.5), 100.0);
}

#[test]
fn test_threshold_is_strict() {
    assert!(is_match(true, 0.39, 0.4));
    assert!(!is_match(true, 0.4, 0.4));
    assert!(!is_match(false, 0.1, 0.4));
}

#[test]
fn test_zero_threshold_never_matches() {
    assert!(!is_match(true, 0.0, 0.0));
    assert!(!is_match(true, -0.1, 0.0));
}

#[tokio::test]
async fn test_empty_corpus_is_success() {
    let corpus = MockCorpusStore::new();
    let comparator = MockComparator::new();

    let matches = find_matches(
        &corpus,
        &comparator,
        b"query",
        PREFIX,
        DEFAULT_THRESHOLD,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_listing_failure_aborts_scan() {
    let corpus = MockCorpusStore::new();
    corpus.fail_listing();
    let comparator = MockComparator::new();

    let err = find_matches(
        &corpus,
        &comparator,
        b"query",
        PREFIX,
        DEFAULT_THRESHOLD,
        ScanOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MatchError::StorageUnavailable(_)));
}

#[tokio::test]
async fn test_threshold_splits_candidates() {
    // A.jpg at distance 0.1 passes, B.jpg at 0.5 does not.
    let corpus = corpus_with(&[
        ("profile_photos/A.jpg", b"face-a"),
        ("profile_photos/B.jpg", b"face-b"),
    ]);
    let comparator = MockComparator::new();
    comparator.script(b"face-a", true, 0.1);
    comparator.script(b"face-b", true, 0.5);

    let matches = find_matches(
        &corpus,
        &comparator,
        b"query",
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate_ref, "profile_photos/A.jpg");
    assert_eq!(matches[0].similarity, 90.0);
}

#[tokio::test]
async fn test_unverified_candidate_never_matches() {
    let corpus = corpus_with(&[("profile_photos/A.jpg", b"face-a")]);
    let comparator = MockComparator::new();
    comparator.script(b"face-a", false, 0.05);

    let matches = find_matches(
        &corpus,
        &comparator,
        b"query",
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_failing_candidate_is_isolated() {
    let corpus = corpus_with(&[
        ("profile_photos/A.jpg", b"face-a"),
        ("profile_photos/B.jpg", b"face-b"),
        ("profile_photos/C.jpg", b"face-c"),
    ]);
    corpus.fail_fetch("profile_photos/B.jpg");

    let comparator = MockComparator::new();
    comparator.script(b"face-a", true, 0.1);
    comparator.script(b"face-c", true, 0.2);

    let options = ScanOptions {
        fetch_retries: 0,
        ..ScanOptions::default()
    };
    let matches = find_matches(&corpus, &comparator, b"query", PREFIX, 0.4, options)
        .await
        .unwrap();

    let refs: Vec<&str> = matches.iter().map(|m| m.candidate_ref.as_str()).collect();
    assert_eq!(refs, vec!["profile_photos/A.jpg", "profile_photos/C.jpg"]);
}

#[tokio::test]
async fn test_comparator_failure_is_isolated() {
    let corpus = corpus_with(&[
        ("profile_photos/A.jpg", b"face-a"),
        ("profile_photos/B.jpg", b"face-b"),
    ]);
    let comparator = MockComparator::new();
    comparator.script_failure(b"face-a", "no face detected");
    comparator.script(b"face-b", true, 0.2);

    let matches = find_matches(
        &corpus,
        &comparator,
        b"query",
        PREFIX,
        0.4,
        ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate_ref, "profile_photos/B.jpg");
}

#[tokio::test]
async fn test_matches_preserve_scan_order() {
    let corpus = corpus_with(&[
        ("profile_photos/a.jpg", b"f1"),
        ("profile_photos/b.jpg", b"f2"),
        ("profile_photos/c.jpg", b"f3"),
        ("profile_photos/d.jpg", b"f4"),
    ]);
    let comparator = MockComparator::new();
    // Similarity order differs from scan order on purpose.
    comparator.script(b"f1", true, 0.3);
    comparator.script(b"f2", true, 0.1);
    comparator.script(b"f3", true, 0.2);
    comparator.script(b"f4", true, 0.05);

    let options = ScanOptions {
        concurrency: 4,
        fetch_retries: 0,
    };
    let matches = find_matches(&corpus, &comparator, b"query", PREFIX, 0.4, options)
        .await
        .unwrap();

    let refs: Vec<&str> = matches.iter().map(|m| m.candidate_ref.as_str()).collect();
    assert_eq!(
        refs,
        vec![
            "profile_photos/a.jpg",
            "profile_photos/b.jpg",
            "profile_photos/c.jpg",
            "profile_photos/d.jpg",
        ]
    );
}
