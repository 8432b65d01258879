use serde::{Deserialize, Serialize};

/// Body of a chat response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// The bot's reply text.
    pub reply: String,
}

impl ChatResponse {
    /// Creates a chat response carrying `reply`.
    pub fn new<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}
