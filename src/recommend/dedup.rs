//! Greedy similarity-based deduplication.

use std::sync::Arc;

use tracing::debug;

use crate::embedding::{EmbeddingCache, EmbeddingError, TextEncoder};
use crate::similarity::{cosine, to_f32_vec};

/// Filters near-duplicate recommendations.
///
/// Greedy in input order: a candidate is discarded when its similarity to any
/// already-accepted text strictly exceeds the threshold, so the first of two
/// near-identical phrasings survives. Quadratic in the candidate count, which
/// is bounded by the reranker's top-k.
#[derive(Debug)]
pub struct Deduplicator {
    encoder: Arc<TextEncoder>,
    threshold: f32,
}

impl Deduplicator {
    pub fn new(encoder: Arc<TextEncoder>, threshold: f32) -> Self {
        Self { encoder, threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the accepted texts in order of first acceptance.
    ///
    /// Embeddings come from `cache` for texts that were part of the static
    /// corpus; anything else (elaborated phrasings) is encoded on demand.
    pub fn dedup(
        &self,
        candidates: Vec<String>,
        cache: &EmbeddingCache,
    ) -> Result<Vec<String>, EmbeddingError> {
        let mut accepted: Vec<(String, Vec<f32>)> = Vec::with_capacity(candidates.len());

        for text in candidates {
            let vector = match cache.get(&text) {
                Some(cached) => to_f32_vec(cached),
                None => self.encoder.embed(&text)?,
            };

            let max_similarity = accepted
                .iter()
                .map(|(_, kept)| cosine(kept, &vector))
                .fold(f32::NEG_INFINITY, f32::max);

            if !accepted.is_empty() && max_similarity > self.threshold {
                debug!(
                    similarity = max_similarity,
                    threshold = self.threshold,
                    text = %text,
                    "Dropping near-duplicate recommendation"
                );
                continue;
            }

            accepted.push((text, vector));
        }

        Ok(accepted.into_iter().map(|(text, _)| text).collect())
    }
}
