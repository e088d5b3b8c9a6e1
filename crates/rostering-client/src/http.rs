//! HTTP transport for the gateway's chat endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rostering_core::Message;

use crate::error::ClientError;

/// Something that can fetch the assistant reply for a conversation.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the full conversation and return the reply text.
    async fn fetch_reply(&self, messages: &[Message]) -> Result<String, ClientError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Deserialize)]
struct ChatError {
    error: String,
}

/// Quick-action and suggestion labels published by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuickActionLabels {
    pub quick_actions: Vec<String>,
    pub suggestions: Vec<String>,
}

/// HTTP client for the gateway.
pub struct HttpChatTransport {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    /// Create a new HTTP transport.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the gateway is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Fetch the button labels for the panel.
    pub async fn quick_actions(&self) -> Result<QuickActionLabels, ClientError> {
        let url = format!("{}/api/quick-actions", self.base_url);
        debug!(url = %url, "GET request");

        let response = self.inner.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn fetch_reply(&self, messages: &[Message]) -> Result<String, ClientError> {
        let url = format!("{}/api/ai", self.base_url);
        debug!(url = %url, messages = messages.len(), "POST chat request");

        let response = self
            .inner
            .post(&url)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // The gateway's 500 still carries a displayable `{ reply }`.
        if status.is_success() || status.as_u16() == 500 {
            let reply: ChatReply = serde_json::from_slice(&body)
                .map_err(|e| ClientError::Serialization(e.to_string()))?;
            return Ok(reply.reply);
        }

        if status.as_u16() == 400 {
            let message = serde_json::from_slice::<ChatError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(ClientError::InvalidRequest(message));
        }

        Err(ClientError::Status(status.as_u16()))
    }
}
