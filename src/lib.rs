//! Vigil library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Corpus`], [`Intent`], [`CrimeEntry`], [`Scenario`] - Static corpora
//! - [`CrimeAssistant`], [`PipelineSettings`] - The request pipeline
//!
//! ## Matching & Scoring
//! - [`LabelMatcher`], [`ChatMatch`], [`SimilarCrime`] - Label resolution
//! - [`SentimentReranker`], [`RankedCandidate`] - Sentiment-gap ranking
//! - [`Deduplicator`] - Near-duplicate filtering
//! - [`cosine`], [`top_k`], [`ScoredCandidate`] - Similarity primitives
//!
//! ## Models (wrapped, stub-capable)
//! - [`TextEncoder`], [`EncoderConfig`], [`EmbeddingCache`] - Sentence encoding
//! - [`SentimentScorer`], [`SentimentConfig`] - Signed sentiment in `[-1, 1]`
//! - [`Elaborator`] - Best-effort recommendation rewriting
//!
//! ## Outcomes
//! - [`ChatReply`], [`ReportAdvice`], [`PipelineError`] - Pipeline results
//!
//! The gateway module is primarily used by the `vigil` server binary.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod elaborate;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod matcher;
pub mod pipeline;
pub mod recommend;
pub mod sentiment;
pub mod similarity;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use corpus::{Corpus, CorpusError, CrimeEntry, Intent, Scenario};
pub use elaborate::Elaborator;
pub use embedding::{EmbeddingCache, EmbeddingError, EncoderConfig, TextEncoder};
pub use hashing::{hash_text_key, hash_to_u64};
pub use matcher::{
    ChatMatch, CorpusIndex, LabelMatcher, RandomSelector, ResponseSelector, RoundRobinSelector,
    SimilarCrime,
};
pub use pipeline::{ChatReply, CrimeAssistant, MatchKind, PipelineError, PipelineSettings, ReportAdvice};
pub use recommend::{Deduplicator, RankedCandidate, SentimentReranker, collect_recommendations};
pub use sentiment::{SentimentConfig, SentimentError, SentimentScorer};
pub use similarity::{ScoredCandidate, cosine, cosine_f16, top_k};
