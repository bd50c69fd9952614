use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("failed to load sentiment model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("sentiment inference failed: {reason}")]
    InferenceFailed { reason: String },
}

impl From<candle_core::Error> for SentimentError {
    fn from(err: candle_core::Error) -> Self {
        SentimentError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
