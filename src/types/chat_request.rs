use serde::{Deserialize, Serialize};

/// Body of a `POST /chat` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The trimmed message text.
    pub message: String,
}

impl ChatRequest {
    /// Creates a chat request for `message`.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
