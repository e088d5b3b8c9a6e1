//! Rostering Copilot Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Filesystem
//! - Runtime specifics
//!
//! Both the chat gateway and the chat panel build on these types.

pub mod chat;
pub mod error;
pub mod ids;
pub mod quick_action;
pub mod roster;

// Re-export commonly used types
pub use chat::{
    ChatRole, Message, Role, TranscriptEntry, GREETING, NO_RESPONSE_REPLY, UPSTREAM_FAILURE_REPLY,
};
pub use error::CoreError;
pub use ids::MessageId;
pub use quick_action::{QuickActions, SUGGESTIONS};
pub use roster::RosterContext;
