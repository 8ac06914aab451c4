#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: &str) -> ChatRequest {
        return ChatRequest {
            message: message.to_string(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ChatReply {
    /// Parses a success body. Empty or malformed bodies are not errors, they
    /// simply carry no reply.
    pub fn from_body(body: &str) -> ChatReply {
        if body.trim().is_empty() {
            return ChatReply::default();
        }

        match serde_json::from_str::<ChatReply>(body) {
            Ok(reply) => return reply,
            Err(err) => {
                tracing::debug!(error = ?err, body, "Chat response body was not a reply object");
                return ChatReply::default();
            }
        }
    }

    /// The reply text, if the service sent a non-empty one.
    pub fn text(&self) -> Option<&str> {
        return self.reply.as_deref().filter(|text| return !text.is_empty());
    }
}

#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ChatApiError {
    pub fn status(status: u16, body: &str) -> ChatApiError {
        let body = if body.is_empty() {
            "Request failed".to_string()
        } else {
            body.to_string()
        };

        return ChatApiError::Status { status, body };
    }
}

#[async_trait]
pub trait Backend {
    /// Sends a single message to the chat endpoint and waits for the reply.
    /// There are no retries and no timeout beyond the transport's own.
    async fn send_message(&self, request: ChatRequest) -> Result<ChatReply, ChatApiError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
