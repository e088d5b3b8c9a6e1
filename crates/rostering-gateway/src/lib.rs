//! Rostering Copilot Gateway Library
//!
//! This crate provides the server side of the copilot chat: quick-action
//! short-circuiting, system prompt assembly, forwarding to the completion
//! provider, and the HTTP surface consumed by the chat panel.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod prompt;
pub mod roster;
pub mod state;
pub mod upstream;

pub use config::Config;
pub use error::GatewayError;
pub use gateway::{CompletionSettings, Gateway, Reply, ReplySource};
pub use state::AppState;
pub use upstream::{CompletionProvider, OpenAiClient, UpstreamError};

#[cfg(test)]
pub(crate) mod testing;
