//! Precomputed corpus embeddings for the matcher.
//!
//! Built once at startup and shared read-only across requests. Each intent
//! pattern is embedded separately; each crime entry is embedded as one unit
//! (label concatenated with its prompts); every recommendation string lands
//! in the text-keyed [`EmbeddingCache`] for the deduplicator.

use half::f16;

use crate::constants::validate_embedding_dim;
use crate::corpus::Corpus;
use crate::embedding::{EmbeddingCache, EmbeddingError, TextEncoder};
use crate::similarity::to_f16_vec;

/// One embedded intent pattern and the intent it belongs to.
#[derive(Debug)]
pub struct PatternSlot {
    pub intent_idx: usize,
    pub vector: Vec<f16>,
}

/// Load-time embeddings of the full static corpus.
#[derive(Debug)]
pub struct CorpusIndex {
    patterns: Vec<PatternSlot>,
    crime_vectors: Vec<Vec<f16>>,
    recommendations: EmbeddingCache,
    embedding_dim: usize,
}

impl CorpusIndex {
    /// Embeds the whole corpus in one batch pass per group.
    pub fn build(encoder: &TextEncoder, corpus: &Corpus) -> Result<Self, EmbeddingError> {
        let embedding_dim = encoder.embedding_dim();

        // Flatten intent patterns, remembering their owning intent.
        let mut pattern_texts: Vec<&str> = Vec::new();
        let mut pattern_owners: Vec<usize> = Vec::new();
        for (intent_idx, intent) in corpus.intents().iter().enumerate() {
            for pattern in &intent.patterns {
                pattern_texts.push(pattern.as_str());
                pattern_owners.push(intent_idx);
            }
        }

        let pattern_vectors = encoder.embed_batch(&pattern_texts)?;
        let mut patterns = Vec::with_capacity(pattern_vectors.len());
        for (vector, &intent_idx) in pattern_vectors.iter().zip(pattern_owners.iter()) {
            validate_embedding_dim(vector.len(), embedding_dim).map_err(|e| {
                EmbeddingError::InvalidConfig {
                    reason: e.to_string(),
                }
            })?;
            patterns.push(PatternSlot {
                intent_idx,
                vector: to_f16_vec(vector),
            });
        }

        let crime_texts: Vec<String> = corpus.crimes().iter().map(|c| c.match_text()).collect();
        let crime_refs: Vec<&str> = crime_texts.iter().map(|s| s.as_str()).collect();
        let crime_vectors: Vec<Vec<f16>> = encoder
            .embed_batch(&crime_refs)?
            .iter()
            .map(|v| to_f16_vec(v))
            .collect();

        let recommendation_texts: Vec<&str> = corpus
            .crimes()
            .iter()
            .flat_map(|c| c.scenarios.iter())
            .flat_map(|s| s.recommendations.iter())
            .map(|r| r.as_str())
            .collect();
        let recommendations = EmbeddingCache::build(encoder, &recommendation_texts)?;

        tracing::info!(
            patterns = patterns.len(),
            crimes = crime_vectors.len(),
            recommendations = recommendations.len(),
            embedding_dim = embedding_dim,
            "Corpus index built"
        );

        Ok(Self {
            patterns,
            crime_vectors,
            recommendations,
            embedding_dim,
        })
    }

    pub fn patterns(&self) -> &[PatternSlot] {
        &self.patterns
    }

    pub fn crime_vectors(&self) -> &[Vec<f16>] {
        &self.crime_vectors
    }

    /// Text-keyed cache of every recommendation string's embedding.
    pub fn recommendation_cache(&self) -> &EmbeddingCache {
        &self.recommendations
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}
