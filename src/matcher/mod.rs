//! Label Matcher: resolves free text to domain labels.
//!
//! Two operating modes over the same similarity primitive:
//!
//! - **Chat mode** ([`LabelMatcher::resolve`]): single-best disambiguation
//!   between intents and crime entries, gated by a confidence threshold.
//!   Conversational turns may be out-of-domain, so a reject outcome exists.
//! - **Report mode** ([`LabelMatcher::detect_labels`]): threshold-free top-N
//!   crime labels. An incident report always needs *some* label to drive
//!   recommendation retrieval; downstream stages degrade gracefully on a
//!   loose match.

pub mod index;
pub mod types;

#[cfg(test)]
mod tests;

pub use index::CorpusIndex;
pub use types::{
    ChatMatch, RandomSelector, ResponseSelector, RoundRobinSelector, SimilarCrime,
};

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::corpus::Corpus;
use crate::similarity::{cosine_f16, top_k};

/// Resolves query embeddings to intents and crime labels.
#[derive(Debug)]
pub struct LabelMatcher {
    corpus: Arc<Corpus>,
    index: Arc<CorpusIndex>,
    threshold: f32,
}

impl LabelMatcher {
    pub fn new(corpus: Arc<Corpus>, index: Arc<CorpusIndex>, threshold: f32) -> Self {
        Self {
            corpus,
            index,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Chat-mode disambiguation: best intent pattern vs best crime entry.
    ///
    /// The threshold is inclusive — a best score exactly equal to it is a
    /// match. A tie between the two groups resolves to the crime side.
    pub fn resolve(&self, query_vec: &[f32]) -> ChatMatch {
        let best_intent = self.best_pattern_match(query_vec);
        let best_crime = self.best_crime_match(query_vec);

        let best_score = match (best_intent, best_crime) {
            (Some((_, i)), Some((_, c))) => i.max(c),
            (Some((_, i)), None) => i,
            (None, Some((_, c))) => c,
            (None, None) => {
                return ChatMatch::NoConfidentMatch { best_score: 0.0 };
            }
        };

        if best_score < self.threshold {
            debug!(
                best_score = best_score,
                threshold = self.threshold,
                "No confident match"
            );
            return ChatMatch::NoConfidentMatch { best_score };
        }

        match (best_intent, best_crime) {
            (Some((intent_idx, intent_score)), Some((_, crime_score)))
                if intent_score > crime_score =>
            {
                ChatMatch::Intent {
                    index: intent_idx,
                    score: intent_score,
                }
            }
            (Some((intent_idx, intent_score)), None) => ChatMatch::Intent {
                index: intent_idx,
                score: intent_score,
            },
            (_, Some((crime_idx, crime_score))) => ChatMatch::Crime {
                index: crime_idx,
                score: crime_score,
            },
            // Unreachable: both-None returned above.
            (None, None) => ChatMatch::NoConfidentMatch { best_score },
        }
    }

    /// Report-mode detection: the `top_n` best crime labels, no threshold.
    ///
    /// Returns fewer than `top_n` labels only when the corpus has fewer
    /// entries; never fails for `top_n` larger than the corpus.
    pub fn detect_labels(&self, query_vec: &[f32], top_n: usize) -> Vec<String> {
        let ranked = top_k(query_vec, self.index.crime_vectors(), top_n);

        let labels: Vec<String> = ranked
            .iter()
            .map(|c| self.corpus.crimes()[c.index].crime.clone())
            .collect();

        debug!(labels = ?labels, "Detected crime labels");

        labels
    }

    /// Similar-crime search: the `top_n` entries most similar to the query,
    /// excluding a case-insensitive exact label match.
    pub fn similar_crimes(&self, query_text: &str, query_vec: &[f32], top_n: usize) -> Vec<SimilarCrime> {
        let needle = query_text.trim().to_lowercase();

        let mut scored: Vec<SimilarCrime> = self
            .index
            .crime_vectors()
            .iter()
            .enumerate()
            .map(|(idx, vec)| {
                let entry = &self.corpus.crimes()[idx];
                SimilarCrime {
                    crime: entry.crime.clone(),
                    description: entry.description.clone(),
                    similarity: cosine_f16(vec, query_vec),
                }
            })
            .filter(|c| c.crime.to_lowercase() != needle)
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_n);

        scored
    }

    fn best_pattern_match(&self, query_vec: &[f32]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;

        for slot in self.index.patterns() {
            let score = cosine_f16(&slot.vector, query_vec);
            // Strict comparison keeps the first-seen pattern on ties.
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((slot.intent_idx, score));
            }
        }

        best
    }

    fn best_crime_match(&self, query_vec: &[f32]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;

        for (idx, vec) in self.index.crime_vectors().iter().enumerate() {
            let score = cosine_f16(vec, query_vec);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((idx, score));
            }
        }

        best
    }
}
