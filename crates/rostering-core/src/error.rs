//! Core domain errors.

use thiserror::Error;

/// Core domain errors for the rostering copilot.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
