use serde::{Deserialize, Serialize};

/// One prior turn of the conversation, as the frontend stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `user` or `model`.
    pub role: String,
    pub text: String,
}

/// Chat request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Chat response body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
