use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse corpus file {path}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("intent with empty id")]
    EmptyIntentId,

    #[error("intent '{id}' has no patterns")]
    IntentWithoutPatterns { id: String },

    #[error("intent '{id}' has no responses")]
    IntentWithoutResponses { id: String },

    #[error("crime entry at index {index} has an empty label")]
    EmptyCrimeLabel { index: usize },

    #[error("duplicate crime label '{label}'")]
    DuplicateCrimeLabel { label: String },
}
