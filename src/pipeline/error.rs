use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::sentiment::SentimentError;

/// Request-fatal pipeline failures.
///
/// Only external-model failures abort a request: the pipeline cannot proceed
/// without embeddings or sentiment. Everything else (no confident match,
/// unknown labels, empty candidate sets, elaboration failures) is handled
/// inline as a valid outcome or a fallback.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("sentiment scoring failed: {0}")]
    Sentiment(#[from] SentimentError),
}
