//! Sentiment-gap reranking.
//!
//! A recommendation phrased with a tone close to the user's current state
//! reads as more relevant, so candidates are ordered by the absolute
//! difference between their sentiment and the query's.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::sentiment::{SentimentError, SentimentScorer};

/// A candidate scored by the rerank stage.
///
/// `sentiment_gap` is not a similarity — it is the absolute difference of two
/// sentiment scores, and smaller is better. Kept as its own type so the two
/// score kinds can never be mixed up across stages.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub text: String,
    pub sentiment_gap: f32,
}

/// Orders candidates by emotional-tone proximity to the query.
#[derive(Debug)]
pub struct SentimentReranker {
    scorer: Arc<SentimentScorer>,
    top_k: usize,
}

impl SentimentReranker {
    pub fn new(scorer: Arc<SentimentScorer>, top_k: usize) -> Self {
        Self { scorer, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Ranks `candidates` ascending by sentiment gap against
    /// `user_sentiment` and keeps the best `top_k`.
    ///
    /// The sort is stable: candidates with equal gaps keep their aggregation
    /// order. An empty candidate list yields an empty ranking, not an error.
    /// A scorer failure aborts the request — ranking without sentiment would
    /// silently change the documented ordering.
    pub fn rank(
        &self,
        user_sentiment: f32,
        candidates: Vec<String>,
    ) -> Result<Vec<RankedCandidate>, SentimentError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for text in candidates {
            let candidate_sentiment = self.scorer.score(&text)?;
            ranked.push(RankedCandidate {
                sentiment_gap: (user_sentiment - candidate_sentiment).abs(),
                text,
            });
        }

        ranked.sort_by(|a, b| {
            a.sentiment_gap
                .partial_cmp(&b.sentiment_gap)
                .unwrap_or(Ordering::Equal)
        });

        ranked.truncate(self.top_k);

        debug!(
            kept = ranked.len(),
            best_gap = ranked.first().map(|c| c.sentiment_gap),
            "Sentiment reranking complete"
        );

        Ok(ranked)
    }
}
