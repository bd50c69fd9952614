//! Best-effort recommendation elaboration via a chat model.
//!
//! Strictly optional polish: every failure path (provider error, empty reply)
//! falls back to the raw recommendation text. The pipeline never drops a
//! candidate because elaboration failed.


use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, warn};

/// Rewrites recommendation notes into full sentences.
pub struct Elaborator {
    client: Client,
    model: String,
    mock: bool,
}

impl std::fmt::Debug for Elaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elaborator")
            .field("model", &self.model)
            .field("mock", &self.mock)
            .finish()
    }
}

impl Elaborator {
    pub fn new<S: Into<String>>(model: S) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            mock: false,
        }
    }

    /// Mock elaborator: echoes the input unchanged. Used by tests and by
    /// deployments that want the pipeline shape without a provider.
    pub fn mock() -> Self {
        Self {
            client: Client::default(),
            model: String::new(),
            mock: true,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mock
    }

    /// Expands one recommendation. Never fails: any provider problem returns
    /// the original text.
    pub async fn elaborate(&self, text: &str) -> String {
        if self.mock {
            return text.to_string();
        }

        let prompt = format!("Write a proper sentence for this recommendation: {text}");
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        match self.client.exec_chat(&self.model, request, None).await {
            Ok(response) => match response.first_text() {
                Some(elaborated) if !elaborated.trim().is_empty() => {
                    debug!(
                        original_len = text.len(),
                        elaborated_len = elaborated.len(),
                        "Recommendation elaborated"
                    );
                    elaborated.trim().to_string()
                }
                _ => {
                    warn!("Elaborator returned empty text, using raw recommendation");
                    text.to_string()
                }
            },
            Err(e) => {
                warn!(error = %e, "Elaboration failed, using raw recommendation");
                text.to_string()
            }
        }
    }
}
