use super::*;
use crate::corpus::{Corpus, CrimeEntry, Intent, Scenario};
use crate::embedding::TextEncoder;
use std::sync::Arc;

fn intent(id: &str, patterns: &[&str], responses: &[&str]) -> Intent {
    Intent {
        id: id.to_string(),
        patterns: patterns.iter().map(|s| s.to_string()).collect(),
        responses: responses.iter().map(|s| s.to_string()).collect(),
    }
}

fn crime(label: &str, description: &str, prompts: &[&str], recommendations: &[&str]) -> CrimeEntry {
    CrimeEntry {
        crime: label.to_string(),
        description: description.to_string(),
        prompts: prompts.iter().map(|s| s.to_string()).collect(),
        scenarios: vec![Scenario {
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        }],
    }
}

fn fixture_corpus() -> Arc<Corpus> {
    Arc::new(
        Corpus::new(
            vec![
                intent("greeting", &["hello there friend"], &["Hello!"]),
                intent("thanks", &["thank you very much"], &["You're welcome."]),
            ],
            vec![
                crime(
                    "Burglary",
                    "Unlawful entry into a building to commit theft.",
                    &["someone broke into my house", "my home was burgled"],
                    &["Install a deadbolt.", "Join a neighborhood watch."],
                ),
                crime(
                    "Vehicle Theft",
                    "Theft of a motor vehicle.",
                    &["my car was stolen from the parking lot"],
                    &["Fit a steering wheel lock."],
                ),
            ],
        )
        .expect("valid corpus"),
    )
}

fn fixture_matcher(threshold: f32) -> (LabelMatcher, TextEncoder) {
    let corpus = fixture_corpus();
    let encoder = TextEncoder::stub();
    let index = Arc::new(CorpusIndex::build(&encoder, &corpus).expect("index"));
    (LabelMatcher::new(corpus, index, threshold), encoder)
}

#[test]
fn test_resolve_intent_wins_for_pattern_query() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder.embed("hello there friend").expect("embed");

    match matcher.resolve(&query) {
        ChatMatch::Intent { index, score } => {
            assert_eq!(index, 0);
            assert!(score >= 0.6);
        }
        other => panic!("expected intent match, got {}", other),
    }
}

#[test]
fn test_resolve_crime_wins_for_prompt_query() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder
        .embed("someone broke into my house")
        .expect("embed");

    match matcher.resolve(&query) {
        ChatMatch::Crime { index, score } => {
            assert_eq!(index, 0);
            assert!(score >= 0.6);
        }
        other => panic!("expected crime match, got {}", other),
    }
}

#[test]
fn test_resolve_out_of_domain_rejects() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder
        .embed("quarterly spreadsheet formatting tips")
        .expect("embed");

    let result = matcher.resolve(&query);
    assert!(!result.is_confident());
    assert!(result.score() < 0.6);
}

#[test]
fn test_resolve_threshold_is_inclusive() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder.embed("hello there friend").expect("embed");

    let winning_score = matcher.resolve(&query).score();

    // Rebuild with the threshold set to exactly the winning score: still a
    // match (inclusive boundary).
    let corpus = fixture_corpus();
    let index = Arc::new(CorpusIndex::build(&encoder, &corpus).expect("index"));
    let exact = LabelMatcher::new(corpus.clone(), index.clone(), winning_score);
    assert!(exact.resolve(&query).is_confident());

    // One step above the winning score: rejected.
    let above = LabelMatcher::new(corpus, index, winning_score + 1e-4);
    assert!(!above.resolve(&query).is_confident());
}

#[test]
fn test_resolve_group_tie_goes_to_crime() {
    // Intent pattern and crime match text are the same string, so both
    // groups score identically; the crime side must win.
    let corpus = Arc::new(
        Corpus::new(
            vec![intent("mugging-chat", &["mugging robbery"], &["..."])],
            vec![crime("mugging", "Street robbery.", &["robbery"], &[])],
        )
        .expect("valid corpus"),
    );
    let encoder = TextEncoder::stub();
    let index = Arc::new(CorpusIndex::build(&encoder, &corpus).expect("index"));
    let matcher = LabelMatcher::new(corpus, index, 0.5);

    let query = encoder.embed("mugging robbery").expect("embed");
    assert!(matches!(matcher.resolve(&query), ChatMatch::Crime { .. }));
}

#[test]
fn test_resolve_empty_corpus() {
    let corpus = Arc::new(Corpus::new(vec![], vec![]).expect("empty corpus is valid"));
    let encoder = TextEncoder::stub();
    let index = Arc::new(CorpusIndex::build(&encoder, &corpus).expect("index"));
    let matcher = LabelMatcher::new(corpus, index, 0.6);

    let query = encoder.embed("anything").expect("embed");
    assert!(matches!(
        matcher.resolve(&query),
        ChatMatch::NoConfidentMatch { .. }
    ));
}

#[test]
fn test_detect_labels_orders_by_similarity() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder
        .embed("someone broke into my house")
        .expect("embed");

    let labels = matcher.detect_labels(&query, 2);

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0], "Burglary");
    assert_eq!(labels[1], "Vehicle Theft");
}

#[test]
fn test_detect_labels_no_threshold_gate() {
    let (matcher, encoder) = fixture_matcher(0.6);
    // Out-of-domain text still yields labels in report mode.
    let query = encoder.embed("completely unrelated words").expect("embed");

    let labels = matcher.detect_labels(&query, 2);
    assert_eq!(labels.len(), 2);
}

#[test]
fn test_detect_labels_single_entry_corpus() {
    let corpus = Arc::new(
        Corpus::new(
            vec![],
            vec![crime("Burglary", "desc", &["break-in"], &["Lock up."])],
        )
        .expect("valid corpus"),
    );
    let encoder = TextEncoder::stub();
    let index = Arc::new(CorpusIndex::build(&encoder, &corpus).expect("index"));
    let matcher = LabelMatcher::new(corpus, index, 0.6);

    let query = encoder.embed("report of a break-in").expect("embed");
    let labels = matcher.detect_labels(&query, 2);

    // Requesting more labels than the corpus holds is not an error.
    assert_eq!(labels, vec!["Burglary".to_string()]);
}

#[test]
fn test_similar_crimes_excludes_exact_label() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query_text = "burglary";
    let query = encoder.embed(query_text).expect("embed");

    let similar = matcher.similar_crimes(query_text, &query, 3);

    assert!(similar.iter().all(|c| c.crime.to_lowercase() != "burglary"));
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].crime, "Vehicle Theft");
}

#[test]
fn test_similar_crimes_truncates_to_n() {
    let (matcher, encoder) = fixture_matcher(0.6);
    let query = encoder.embed("theft").expect("embed");

    let similar = matcher.similar_crimes("theft", &query, 1);
    assert_eq!(similar.len(), 1);
}

#[test]
fn test_round_robin_selector_cycles() {
    let selector = RoundRobinSelector::new();
    let responses = vec!["a".to_string(), "b".to_string()];

    assert_eq!(selector.select(&responses), Some("a"));
    assert_eq!(selector.select(&responses), Some("b"));
    assert_eq!(selector.select(&responses), Some("a"));
}

#[test]
fn test_random_selector_seeded_is_deterministic() {
    let responses: Vec<String> = (0..10).map(|i| format!("response {i}")).collect();

    let picks_a: Vec<_> = {
        let selector = RandomSelector::seeded(42);
        (0..5).map(|_| selector.select(&responses).map(String::from)).collect()
    };
    let picks_b: Vec<_> = {
        let selector = RandomSelector::seeded(42);
        (0..5).map(|_| selector.select(&responses).map(String::from)).collect()
    };

    assert_eq!(picks_a, picks_b);
}

#[test]
fn test_selectors_handle_empty_lists() {
    assert_eq!(RoundRobinSelector::new().select(&[]), None);
    assert_eq!(RandomSelector::seeded(1).select(&[]), None);
}

#[test]
fn test_chat_match_display() {
    let m = ChatMatch::NoConfidentMatch { best_score: 0.25 };
    assert!(format!("{}", m).contains("NO_CONFIDENT_MATCH"));
    assert!(format!("{}", ChatMatch::Intent { index: 1, score: 0.9 }).contains("INTENT"));
}
