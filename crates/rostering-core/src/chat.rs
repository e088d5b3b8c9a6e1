//! Chat message types for conversation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MessageId;

/// Text of the assistant message a fresh chat panel opens with.
pub const GREETING: &str = "Hi! I can help with coverage, compliance checks, and quick reports.";

/// Assistant text shown when the completion provider answered without usable text.
pub const NO_RESPONSE_REPLY: &str = "No response from AI.";

/// Assistant text shown when the completion provider (or the gateway) could not be reached.
pub const UPSTREAM_FAILURE_REPLY: &str = "AI API error occurred.";

/// Author of a message in the copilot conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed (or clicked) by the user.
    User,
    /// Reply produced by the gateway.
    Assistant,
}

/// Role of a message sent to the completion provider.
///
/// Unlike [`Role`], this includes the system prompt slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System message (instructions).
    System,
    /// User message (input/prompt).
    User,
    /// Assistant message (response).
    Assistant,
}

impl From<Role> for ChatRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        }
    }
}

/// A message exchanged between the chat panel and the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// Message body.
    pub text: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Whether this message was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// A message as held in the chat panel transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Unique id of this entry.
    pub id: MessageId,
    /// The message itself.
    pub message: Message,
    /// When the entry was appended.
    pub created_at: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Wrap a message with a fresh id and the current time.
    pub fn new(message: Message) -> Self {
        Self {
            id: MessageId::generate(),
            message,
            created_at: Utc::now(),
        }
    }

    /// Role of the wrapped message.
    pub fn role(&self) -> Role {
        self.message.role
    }

    /// Text of the wrapped message.
    pub fn text(&self) -> &str {
        &self.message.text
    }
}
