//! Wire types for the chat proxy endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/chat/initiate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
}

/// Proxy reply; `response` is the text to reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: f64,
    #[serde(default)]
    pub question: String,
    pub response: String,
}
