use std::sync::Arc;

use crate::pipeline::CrimeAssistant;

/// Shared handler state: the immutable assistant core.
#[derive(Clone)]
pub struct HandlerState {
    pub assistant: Arc<CrimeAssistant>,
}

impl HandlerState {
    pub fn new(assistant: Arc<CrimeAssistant>) -> Self {
        Self { assistant }
    }
}
