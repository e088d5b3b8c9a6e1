//! Error types for the chat client.

use thiserror::Error;

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway rejected the conversation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Gateway answered with an unexpected status.
    #[error("unexpected status: HTTP {0}")]
    Status(u16),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The panel task has stopped.
    #[error("chat panel closed")]
    PanelClosed,
}
