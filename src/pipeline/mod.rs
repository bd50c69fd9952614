//! Request pipeline: the immutable context object every operation runs
//! against.
//!
//! [`CrimeAssistant`] owns the loaded corpus, its precomputed embeddings, and
//! the wrapped models. It is constructed once at startup and shared read-only
//! across concurrent requests; per-request state (query embedding, query
//! sentiment, candidate lists) lives on the stack of the handling task and is
//! discarded with the response.

pub mod error;
pub mod types;


pub use error::PipelineError;
pub use types::{ChatReply, MatchKind, ReportAdvice};

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::{
    DEFAULT_DEDUP_THRESHOLD, DEFAULT_DETECT_TOP_N, DEFAULT_RERANK_TOP_K,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::corpus::Corpus;
use crate::elaborate::Elaborator;
use crate::embedding::{EmbeddingError, TextEncoder};
use crate::matcher::{ChatMatch, CorpusIndex, LabelMatcher, ResponseSelector, SimilarCrime};
use crate::recommend::{Deduplicator, SentimentReranker, collect_recommendations};
use crate::sentiment::SentimentScorer;

/// Tunable pipeline parameters. Defaults mirror the `constants` module.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub similarity_threshold: f32,
    pub detect_top_n: usize,
    pub rerank_top_k: usize,
    pub dedup_threshold: f32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            detect_top_n: DEFAULT_DETECT_TOP_N,
            rerank_top_k: DEFAULT_RERANK_TOP_K,
            dedup_threshold: DEFAULT_DEDUP_THRESHOLD,
        }
    }
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            detect_top_n: config.detect_top_n,
            rerank_top_k: config.rerank_top_k,
            dedup_threshold: config.dedup_threshold,
        }
    }
}

/// The assistant core: label matching, recommendation retrieval, ranking,
/// dedup.
pub struct CrimeAssistant {
    corpus: Arc<Corpus>,
    index: Arc<CorpusIndex>,
    encoder: Arc<TextEncoder>,
    sentiment: Arc<SentimentScorer>,
    matcher: LabelMatcher,
    reranker: SentimentReranker,
    dedup: Deduplicator,
    elaborator: Option<Elaborator>,
    selector: Box<dyn ResponseSelector>,
    detect_top_n: usize,
}

impl std::fmt::Debug for CrimeAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrimeAssistant")
            .field("intents", &self.corpus.intents().len())
            .field("crimes", &self.corpus.crimes().len())
            .field("encoder", &self.encoder)
            .field("sentiment", &self.sentiment)
            .field("elaborator", &self.elaborator)
            .finish()
    }
}

impl CrimeAssistant {
    /// Builds the assistant, precomputing every static embedding.
    ///
    /// This is the only place corpus text is embedded; requests embed nothing
    /// but their own query.
    pub fn new(
        corpus: Arc<Corpus>,
        encoder: Arc<TextEncoder>,
        sentiment: Arc<SentimentScorer>,
        elaborator: Option<Elaborator>,
        selector: Box<dyn ResponseSelector>,
        settings: PipelineSettings,
    ) -> Result<Self, EmbeddingError> {
        let index = Arc::new(CorpusIndex::build(&encoder, &corpus)?);

        let matcher = LabelMatcher::new(
            Arc::clone(&corpus),
            Arc::clone(&index),
            settings.similarity_threshold,
        );
        let reranker = SentimentReranker::new(Arc::clone(&sentiment), settings.rerank_top_k);
        let dedup = Deduplicator::new(Arc::clone(&encoder), settings.dedup_threshold);

        Ok(Self {
            corpus,
            index,
            encoder,
            sentiment,
            matcher,
            reranker,
            dedup,
            elaborator,
            selector,
            detect_top_n: settings.detect_top_n,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn encoder_is_stub(&self) -> bool {
        self.encoder.is_stub()
    }

    pub fn sentiment_is_stub(&self) -> bool {
        self.sentiment.is_stub()
    }

    /// Chat mode: single-best intent/crime disambiguation.
    ///
    /// [`ChatReply::NoConfidentMatch`] is a valid terminal outcome; the
    /// transport layer supplies the rephrase prompt.
    pub fn chat(&self, message: &str) -> Result<ChatReply, PipelineError> {
        let query_vec = self.encoder.embed(message)?;

        match self.matcher.resolve(&query_vec) {
            ChatMatch::Intent { index, score } => {
                let intent = &self.corpus.intents()[index];
                debug!(intent = %intent.id, score = score, "Chat resolved to intent");

                match self.selector.select(&intent.responses) {
                    Some(text) => Ok(ChatReply::Answer {
                        text: text.to_string(),
                        matched: MatchKind::Intent,
                        score,
                    }),
                    None => {
                        // Corpus validation rules out empty response lists.
                        warn!(intent = %intent.id, "Intent has no responses");
                        Ok(ChatReply::NoConfidentMatch { best_score: score })
                    }
                }
            }
            ChatMatch::Crime { index, score } => {
                let entry = &self.corpus.crimes()[index];
                debug!(crime = %entry.crime, score = score, "Chat resolved to crime");

                let text = if entry.description.trim().is_empty() {
                    format!(
                        "{} is a recognized crime category. You can report an incident to get prevention recommendations.",
                        entry.crime
                    )
                } else {
                    entry.description.clone()
                };

                Ok(ChatReply::Answer {
                    text,
                    matched: MatchKind::Crime,
                    score,
                })
            }
            ChatMatch::NoConfidentMatch { best_score } => {
                Ok(ChatReply::NoConfidentMatch { best_score })
            }
        }
    }

    /// Report mode: detect labels, retrieve, rank by sentiment gap,
    /// elaborate, dedup.
    ///
    /// An empty recommendation set is a terminal outcome, not an error; the
    /// detected labels are still reported.
    pub async fn report(&self, summary: &str) -> Result<ReportAdvice, PipelineError> {
        let query_vec = self.encoder.embed(summary)?;
        let user_sentiment = self.sentiment.score(summary)?;

        let detected_labels = self.matcher.detect_labels(&query_vec, self.detect_top_n);
        let candidates = collect_recommendations(&self.corpus, &detected_labels);

        debug!(
            labels = ?detected_labels,
            candidates = candidates.len(),
            user_sentiment = user_sentiment,
            "Report candidates aggregated"
        );

        if candidates.is_empty() {
            return Ok(ReportAdvice {
                detected_labels,
                recommendations: Vec::new(),
                user_sentiment,
            });
        }

        let ranked = self.reranker.rank(user_sentiment, candidates)?;

        // Elaboration calls are independent; run them concurrently and
        // collect in order so the documented ranking is unchanged.
        let texts: Vec<String> = match &self.elaborator {
            Some(elaborator) => {
                join_all(ranked.iter().map(|c| elaborator.elaborate(&c.text))).await
            }
            None => ranked.into_iter().map(|c| c.text).collect(),
        };

        let recommendations = self.dedup.dedup(texts, self.index.recommendation_cache())?;

        Ok(ReportAdvice {
            detected_labels,
            recommendations,
            user_sentiment,
        })
    }

    /// Similar-crime search over the corpus, excluding an exact label match.
    pub fn similar_crimes(
        &self,
        crime: &str,
        top_n: usize,
    ) -> Result<Vec<SimilarCrime>, PipelineError> {
        let query_vec = self.encoder.embed(crime)?;
        Ok(self.matcher.similar_crimes(crime, &query_vec, top_n))
    }
}
