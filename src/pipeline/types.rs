/// Which corpus group won chat-mode disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Intent,
    Crime,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Intent => "intent",
            MatchKind::Crime => "crime",
        }
    }
}

/// Outcome of a chat query.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// A confident match produced reply text.
    Answer {
        text: String,
        matched: MatchKind,
        score: f32,
    },
    /// Nothing scored at or above the threshold — the caller should prompt
    /// for rephrasing. Not an error.
    NoConfidentMatch { best_score: f32 },
}

impl ChatReply {
    pub fn is_confident(&self) -> bool {
        matches!(self, ChatReply::Answer { .. })
    }

    pub fn score(&self) -> f32 {
        match self {
            ChatReply::Answer { score, .. } => *score,
            ChatReply::NoConfidentMatch { best_score } => *best_score,
        }
    }
}

/// Outcome of an incident-report query.
///
/// `recommendations` may be empty (labels with no registered advice); that is
/// a terminal outcome the transport layer turns into a "no recommendations
/// available" message naming the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportAdvice {
    /// Crime labels detected from the report summary, best first.
    pub detected_labels: Vec<String>,
    /// Ranked, elaborated, deduplicated recommendation texts.
    pub recommendations: Vec<String>,
    /// The report summary's sentiment, surfaced as a diagnostic.
    pub user_sentiment: f32,
}

impl ReportAdvice {
    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}
