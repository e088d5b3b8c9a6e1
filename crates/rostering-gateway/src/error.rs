//! Gateway errors.

use thiserror::Error;

/// Errors raised while computing a copilot reply.
///
/// Provider failures never appear here; they resolve to a fallback reply.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed inbound payload. Surfaced to the caller as a 400.
    #[error("{0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Shorthand for [`GatewayError::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        GatewayError::InvalidRequest(message.into())
    }
}
