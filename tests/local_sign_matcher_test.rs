mod helpers;

use std::sync::Arc;

use signstream::application::ports::SignMatcher;
use signstream::application::services::{DEFAULT_SIGN_GLOSS, LocalSignMatcher, SignCatalogue, score_record};
use signstream::domain::Embedding;

use helpers::{embedder, flat_sign, test_catalogue};

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn flat_matcher(records: Vec<signstream::domain::SignRecord>) -> LocalSignMatcher {
    let catalogue = Arc::new(SignCatalogue::new(records, DEFAULT_SIGN_GLOSS).unwrap());
    LocalSignMatcher::new(catalogue, embedder())
}

#[test]
fn given_keyword_in_catalogue_when_ranking_then_matching_sign_comes_first() {
    let matcher = LocalSignMatcher::new(test_catalogue(), embedder());

    let results = matcher.rank(&keywords(&["meeting"]), 5);

    assert_eq!(results[0].gloss, "MEETING");
    assert!(results[0].score >= 0.7);
}

#[test]
fn given_more_overlapping_keywords_when_ranking_then_score_grows() {
    let matcher = flat_matcher(vec![
        flat_sign("hello", "HELLO", &["hello", "hi"], &[]),
        flat_sign("meeting", "MEETING", &["meeting", "session"], &[]),
    ]);

    let results = matcher.rank(&keywords(&["meeting", "session", "hi"]), 5);

    assert_eq!(results[0].gloss, "MEETING");
    assert!(results[0].score > results[1].score);
}

#[test]
fn given_no_overlap_topic_or_similarity_when_ranking_then_record_is_excluded() {
    let matcher = flat_matcher(vec![
        flat_sign("hello", "HELLO", &["hello"], &["greeting"]),
        flat_sign("meeting", "MEETING", &["meeting"], &["work"]),
    ]);

    let results = matcher.rank(&keywords(&["banana"]), 5);

    assert!(results.is_empty());
}

#[test]
fn given_topic_match_only_when_scoring_then_adds_small_boost() {
    let record = flat_sign("meeting", "MEETING", &["meeting"], &["work"]);
    let query = keywords(&["work"]);

    let score = score_record(&record, &query, &Embedding::zeros(record.embedding.dimensions()));

    assert!((score - 0.0225).abs() < 1e-6);
}

#[test]
fn given_equal_scores_when_ranking_then_catalogue_order_is_kept() {
    let matcher = flat_matcher(vec![
        flat_sign("hello", "HELLO", &["shared"], &[]),
        flat_sign("wave", "WAVE", &["shared"], &[]),
        flat_sign("hi", "HI", &["shared"], &[]),
    ]);

    let results = matcher.rank(&keywords(&["shared"]), 5);

    let glosses: Vec<&str> = results.iter().map(|r| r.gloss.as_str()).collect();
    assert_eq!(glosses, vec!["HELLO", "WAVE", "HI"]);
}

#[test]
fn given_top_k_when_ranking_then_truncates_results() {
    let matcher = flat_matcher(vec![
        flat_sign("hello", "HELLO", &["shared"], &[]),
        flat_sign("wave", "WAVE", &["shared"], &[]),
        flat_sign("hi", "HI", &["shared"], &[]),
    ]);

    let results = matcher.rank(&keywords(&["shared"]), 2);

    assert_eq!(results.len(), 2);
}

#[test]
fn given_duplicate_and_uppercase_keywords_when_ranking_then_counts_each_once() {
    let matcher = flat_matcher(vec![flat_sign("hello", "HELLO", &["hello"], &[])]);

    let results = matcher.rank(&keywords(&["HELLO", "hello"]), 5);

    assert_eq!(results.len(), 1);
    assert!((results[0].score - 0.7).abs() < 1e-6);
}

#[test]
fn given_no_keywords_when_ranking_then_returns_empty() {
    let matcher = LocalSignMatcher::new(test_catalogue(), embedder());

    assert!(matcher.rank(&[], 5).is_empty());
}

#[tokio::test]
async fn given_local_matcher_when_searching_through_port_then_never_fails() {
    let matcher = LocalSignMatcher::new(test_catalogue(), embedder());

    let results = matcher.search(&keywords(&["today"]), 3).await.unwrap();

    assert_eq!(results[0].gloss, "TODAY");
    assert!(results.len() <= 3);
}
