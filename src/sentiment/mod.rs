//! Sentiment scoring: text → signed scalar in `[-1, 1]`.
//!
//! Positive scores mean favorable or calm tone; negative scores mean distress.
//! Empty text (or text with no scoreable tokens) scores a neutral `0.0` — the
//! scorer never fails on empty input.
//!
//! Backed by a BERT sequence classifier (2-class softmax, score =
//! `P(positive) − P(negative)`), or by a small signed-lexicon stub when no
//! model is configured.

pub mod error;
mod model;

#[cfg(test)]
mod tests;

pub use error::SentimentError;

use std::path::PathBuf;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, warn};

use crate::constants::DEFAULT_MAX_SEQ_LEN;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer_with_truncation;

use model::BertSentimentClassifier;

/// Sentiment scorer configuration.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` selects the stub backend.
    pub model_path: Option<PathBuf>,

    /// Maximum token sequence length.
    pub max_seq_len: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl SentimentConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }
}

enum ScorerBackend {
    Model {
        model: BertSentimentClassifier,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Signed sentiment scorer with a stub fallback.
pub struct SentimentScorer {
    backend: ScorerBackend,
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer")
            .field(
                "backend",
                &match &self.backend {
                    ScorerBackend::Model { device, .. } => format!("Model({:?})", device),
                    ScorerBackend::Stub => "Stub".to_string(),
                },
            )
            .finish()
    }
}

impl SentimentScorer {
    /// Loads the scorer from a config (stub mode is supported).
    pub fn load(config: SentimentConfig) -> Result<Self, SentimentError> {
        let Some(model_path) = config.model_path else {
            warn!("No sentiment model path configured, running scorer in STUB mode");
            return Ok(Self {
                backend: ScorerBackend::Stub,
            });
        };

        if !model_path.is_dir() {
            return Err(SentimentError::ModelLoadFailed {
                reason: format!("sentiment model path not found: {}", model_path.display()),
            });
        }

        let device = select_device().map_err(|e| SentimentError::ModelLoadFailed {
            reason: e.to_string(),
        })?;
        debug!(?device, "Selected compute device for sentiment scorer");

        let model = BertSentimentClassifier::load(&model_path, &device)?;
        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_seq_len)
            .map_err(|e| SentimentError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        tracing::info!(model_path = %model_path.display(), "Sentiment model loaded");

        Ok(Self {
            backend: ScorerBackend::Model {
                model,
                tokenizer,
                device,
            },
        })
    }

    /// Stub scorer for tests.
    pub fn stub() -> Self {
        Self {
            backend: ScorerBackend::Stub,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, ScorerBackend::Stub)
    }

    /// Scores a text. Deterministic; empty input is neutral `0.0`.
    pub fn score(&self, text: &str) -> Result<f32, SentimentError> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        match &self.backend {
            ScorerBackend::Model {
                model,
                tokenizer,
                device,
            } => self.score_with_model(text, model, tokenizer, device),
            ScorerBackend::Stub => Ok(self.score_stub(text)),
        }
    }

    fn score_with_model(
        &self,
        text: &str,
        model: &BertSentimentClassifier,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<f32, SentimentError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| SentimentError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Ok(0.0);
        }

        let input_ids = Tensor::new(tokens, device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let logits = model.forward(&input_ids, &type_ids, Some(&attention_mask))?;
        let probs = candle_nn::ops::softmax(&logits, 1)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        if probs.len() != 2 {
            return Err(SentimentError::InferenceFailed {
                reason: format!("expected 2 class probabilities, got {}", probs.len()),
            });
        }

        // Convention: index 0 = negative, index 1 = positive.
        let score = probs[1] - probs[0];

        debug!(score = score, "Computed sentiment (model)");

        Ok(score.clamp(-1.0, 1.0))
    }

    /// Deterministic stub: signed lexicon over lowercased alphanumeric
    /// tokens. Score is `(positive − negative) / (positive + negative)`;
    /// texts hitting neither list are neutral.
    fn score_stub(&self, text: &str) -> f32 {
        const POSITIVE: &[&str] = &[
            "good", "great", "love", "calm", "safe", "secure", "thank", "thanks", "happy",
            "relieved", "fine", "okay", "helpful", "support", "protected", "reassured",
        ];
        const NEGATIVE: &[&str] = &[
            "scared", "afraid", "terrified", "robbed", "attacked", "hurt", "stolen", "broke",
            "broken", "threat", "threatened", "angry", "unsafe", "fear", "panic", "worried",
            "emergency", "danger", "violated", "shaken",
        ];

        let lowered = text.to_lowercase();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if POSITIVE.contains(&token) {
                positive += 1;
            } else if NEGATIVE.contains(&token) {
                negative += 1;
            }
        }

        if positive + negative == 0 {
            return 0.0;
        }

        let score = (positive as f32 - negative as f32) / (positive + negative) as f32;

        debug!(score = score, "Computed sentiment (stub)");

        score.clamp(-1.0, 1.0)
    }
}
