//! Sentence encoder: text → fixed-length `f32` vector.
//!
//! Backed by a BERT-class model loaded from a safetensors directory, or by a
//! deterministic feature-hashing stub when no model path is configured. Both
//! backends are deterministic: identical input always yields the identical
//! vector.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::hashing::hash_to_u64;

use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::load_tokenizer_with_truncation;

/// Encoder configuration.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` selects the stub backend.
    pub model_path: Option<PathBuf>,

    /// Output vector dimension. With a real model this must match the model's
    /// hidden size; the stub produces vectors of exactly this size.
    pub embedding_dim: usize,

    /// Maximum token sequence length.
    pub max_seq_len: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl EncoderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Stub configuration for tests and model-less deployments.
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim cannot be zero".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len cannot be zero".to_string(),
            });
        }
        Ok(())
    }
}

enum EncoderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence encoder with a stub fallback.
pub struct TextEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl TextEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("No encoder model path configured, running encoder in STUB mode");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        };

        if !model_path.is_dir() {
            return Err(EmbeddingError::ModelNotFound { path: model_path });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for encoder");

        let (model, tokenizer, hidden_size) =
            Self::load_model(&model_path, &device, config.max_seq_len)?;

        if config.embedding_dim != hidden_size {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim, hidden_size
                ),
            });
        }

        tracing::info!(
            model_path = %model_path.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Encoder model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    /// Stub encoder for tests.
    pub fn stub() -> Self {
        Self {
            backend: EncoderBackend::Stub,
            config: EncoderConfig::stub(),
        }
    }

    fn load_model(
        model_dir: &Path,
        device: &Device,
        max_seq_len: usize,
    ) -> Result<(BertModel, Tokenizer, usize), EmbeddingError> {
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(&config_path)?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse config.json: {}", e),
            }
        })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)?
        };

        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb, &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load BERT weights: {}", e),
        })?;

        let tokenizer = load_tokenizer_with_truncation(model_dir, max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        Ok((model, tokenizer, bert_config.hidden_size))
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Encodes a single string. Deterministic for identical input.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Encodes a batch of strings, used for corpus precomputation at load
    /// time.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(tokens, device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden] -> mean over the sequence dimension.
        let hidden = model.forward(&input_ids, &type_ids, Some(&attention_mask))?;
        let pooled = hidden.mean(1)?;
        let embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;

        Ok(normalize(embedding))
    }

    /// Deterministic stub: signed feature hashing over lowercased alphanumeric
    /// tokens. Token overlap between two texts translates into cosine
    /// similarity, which keeps threshold and dedup behavior meaningful in
    /// tests. Texts with no tokens map to the zero vector (cosine 0 against
    /// everything).
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let mut vector = vec![0.0f32; dim];

        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let h = hash_to_u64(token.as_bytes());
            let bucket = (h % dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        normalize(vector)
    }
}

fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine;

    #[test]
    fn test_stub_is_deterministic() {
        let encoder = TextEncoder::stub();

        let a = encoder.embed("someone broke into my house").expect("embed");
        let b = encoder.embed("someone broke into my house").expect("embed");

        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_dimension() {
        let encoder = TextEncoder::stub();
        let v = encoder.embed("hello").expect("embed");
        assert_eq!(v.len(), DEFAULT_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_vectors_are_normalized() {
        let encoder = TextEncoder::stub();
        let v = encoder.embed("install a deadbolt on every door").expect("embed");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let encoder = TextEncoder::stub();

        let v = encoder.embed("").expect("embed");
        assert!(v.iter().all(|&x| x == 0.0));

        let v = encoder.embed("!!! ???").expect("embed");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_stub_token_overlap_raises_similarity() {
        let encoder = TextEncoder::stub();

        let base = encoder.embed("install a deadbolt").expect("embed");
        let near = encoder.embed("install a deadbolt immediately").expect("embed");
        let far = encoder.embed("join a neighborhood watch").expect("embed");

        let near_score = cosine(&base, &near);
        let far_score = cosine(&base, &far);

        assert!(near_score > far_score);
        assert!(near_score > 0.8);
    }

    #[test]
    fn test_stub_case_insensitive() {
        let encoder = TextEncoder::stub();

        let a = encoder.embed("Burglary Break-In").expect("embed");
        let b = encoder.embed("burglary break-in").expect("embed");

        assert_eq!(a, b);
    }

    #[test]
    fn test_embed_batch_matches_single() {
        let encoder = TextEncoder::stub();

        let batch = encoder
            .embed_batch(&["hello", "stolen wallet"])
            .expect("batch");
        let single = encoder.embed("stolen wallet").expect("embed");

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], single);
    }

    #[test]
    fn test_config_validation() {
        let config = EncoderConfig {
            embedding_dim: 0,
            ..Default::default()
        };
        assert!(matches!(
            TextEncoder::load(config),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_load_missing_model_dir() {
        let config = EncoderConfig::new("/nonexistent/encoder");
        assert!(matches!(
            TextEncoder::load(config),
            Err(EmbeddingError::ModelNotFound { .. })
        ));
    }
}
