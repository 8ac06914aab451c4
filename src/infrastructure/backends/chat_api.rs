#[cfg(test)]
#[path = "chat_api_test.rs"]
mod tests;

use async_trait::async_trait;

use crate::domain::models::Backend;
use crate::domain::models::ChatApiError;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::Endpoint;

pub struct ChatApi {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl ChatApi {
    pub fn new(endpoint: Endpoint) -> ChatApi {
        return ChatApi {
            client: reqwest::Client::new(),
            endpoint,
        };
    }
}

#[async_trait]
impl Backend for ChatApi {
    #[allow(clippy::implicit_return)]
    async fn send_message(&self, request: ChatRequest) -> Result<ChatReply, ChatApiError> {
        let url = self.endpoint.chat_url();
        tracing::debug!(url, message = request.message, "Chat request");

        let res = self.client.post(&url).json(&request).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body, "Chat endpoint returned an error");
            return Err(ChatApiError::status(status.as_u16(), &body));
        }

        tracing::debug!(body, "Chat response");
        return Ok(ChatReply::from_body(&body));
    }
}
