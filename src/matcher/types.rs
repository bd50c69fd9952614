use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcome of chat-mode disambiguation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatMatch {
    /// An intent won. `index` points into the corpus intent list.
    Intent { index: usize, score: f32 },
    /// A crime entry won. `index` points into the corpus crime list.
    Crime { index: usize, score: f32 },
    /// Nothing scored at or above the threshold. This is a valid terminal
    /// outcome, not an error; the caller supplies a fallback message.
    NoConfidentMatch { best_score: f32 },
}

impl ChatMatch {
    /// Returns `true` unless the match was rejected by the threshold.
    pub fn is_confident(&self) -> bool {
        !matches!(self, ChatMatch::NoConfidentMatch { .. })
    }

    /// Returns the winning (or best rejected) similarity score.
    pub fn score(&self) -> f32 {
        match self {
            ChatMatch::Intent { score, .. } | ChatMatch::Crime { score, .. } => *score,
            ChatMatch::NoConfidentMatch { best_score } => *best_score,
        }
    }
}

impl std::fmt::Display for ChatMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatMatch::Intent { index, score } => {
                write!(f, "INTENT (index: {}, score: {:.4})", index, score)
            }
            ChatMatch::Crime { index, score } => {
                write!(f, "CRIME (index: {}, score: {:.4})", index, score)
            }
            ChatMatch::NoConfidentMatch { best_score } => {
                write!(f, "NO_CONFIDENT_MATCH (best_score: {:.4})", best_score)
            }
        }
    }
}

/// A crime entry returned by similar-crime search.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarCrime {
    pub crime: String,
    pub description: String,
    /// Cosine similarity of the query against this entry's match text.
    pub similarity: f32,
}

/// Strategy for choosing one canned response from an intent's list.
///
/// Pluggable so tests can force determinism. Returns `None` only for an
/// empty list (corpus validation rules that out for loaded data).
pub trait ResponseSelector: Send + Sync {
    fn select<'a>(&self, responses: &'a [String]) -> Option<&'a str>;
}

/// Uniform-random selection (seeded for reproducibility).
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSelector for RandomSelector {
    fn select<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        if responses.is_empty() {
            return None;
        }
        let idx = self.rng.lock().gen_range(0..responses.len());
        responses.get(idx).map(|s| s.as_str())
    }
}

/// Deterministic rotation through the response list.
#[derive(Default)]
pub struct RoundRobinSelector {
    cursor: Mutex<usize>,
}

impl RoundRobinSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseSelector for RoundRobinSelector {
    fn select<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        if responses.is_empty() {
            return None;
        }
        let mut cursor = self.cursor.lock();
        let idx = *cursor % responses.len();
        *cursor = cursor.wrapping_add(1);
        responses.get(idx).map(|s| s.as_str())
    }
}
