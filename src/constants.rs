//! Cross-cutting, shared constants.
//!
//! Thresholds and top-k values here are defaults, not invariants: every one of
//! them can be overridden through [`Config`](crate::config::Config). Derive
//! secondary constants from primary ones to avoid drift.

/// Default embedding dimension (MiniLM-class sentence encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Minimum similarity for a chat-mode match. Inclusive: a score exactly equal
/// to the threshold is accepted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.6;

/// Pairwise similarity above which two recommendations count as duplicates.
pub const DEFAULT_DEDUP_THRESHOLD: f32 = 0.7;

/// Number of crime labels detected for an incident report.
pub const DEFAULT_DETECT_TOP_N: usize = 2;

/// Number of recommendations kept after sentiment-gap reranking.
pub const DEFAULT_RERANK_TOP_K: usize = 3;

/// Maximum token sequence length fed to the encoder and sentiment models.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries (index build, cache lookup) to catch
/// mismatches early instead of silently comparing vectors of different sizes.
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_match() {
        assert!(validate_embedding_dim(384, 384).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(768, 384),
            Err(DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 768
            })
        );
    }

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, 0),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }
}
