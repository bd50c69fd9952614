use super::*;

#[test]
fn test_empty_text_is_neutral() {
    let scorer = SentimentScorer::stub();

    assert_eq!(scorer.score("").expect("score"), 0.0);
    assert_eq!(scorer.score("   ").expect("score"), 0.0);
}

#[test]
fn test_no_lexicon_hits_is_neutral() {
    let scorer = SentimentScorer::stub();
    assert_eq!(scorer.score("the report was filed yesterday").expect("score"), 0.0);
}

#[test]
fn test_distress_scores_negative() {
    let scorer = SentimentScorer::stub();

    let score = scorer
        .score("I am terrified, someone robbed me")
        .expect("score");
    assert!(score < 0.0);
    assert!(score >= -1.0);
}

#[test]
fn test_calm_scores_positive() {
    let scorer = SentimentScorer::stub();

    let score = scorer.score("stay calm and keep your home safe").expect("score");
    assert!(score > 0.0);
    assert!(score <= 1.0);
}

#[test]
fn test_mixed_tone_is_between_extremes() {
    let scorer = SentimentScorer::stub();

    let pure_distress = scorer.score("terrified scared panic").expect("score");
    let mixed = scorer.score("terrified but safe now").expect("score");

    assert_eq!(pure_distress, -1.0);
    assert!(mixed > pure_distress);
    assert!(mixed < 1.0);
}

#[test]
fn test_determinism() {
    let scorer = SentimentScorer::stub();
    let text = "I feel unsafe after the break-in";

    let a = scorer.score(text).expect("score");
    let b = scorer.score(text).expect("score");

    assert_eq!(a, b);
}

#[test]
fn test_score_range() {
    let scorer = SentimentScorer::stub();

    for text in [
        "terrified attacked hurt stolen",
        "safe calm happy relieved",
        "a completely neutral sentence",
    ] {
        let score = scorer.score(text).expect("score");
        assert!((-1.0..=1.0).contains(&score), "score out of range: {score}");
    }
}

#[test]
fn test_stub_flag() {
    assert!(SentimentScorer::stub().is_stub());

    let loaded = SentimentScorer::load(SentimentConfig::stub()).expect("stub load");
    assert!(loaded.is_stub());
}

#[test]
fn test_load_missing_model_dir() {
    let config = SentimentConfig::new("/nonexistent/sentiment");
    assert!(matches!(
        SentimentScorer::load(config),
        Err(SentimentError::ModelLoadFailed { .. })
    ));
}
