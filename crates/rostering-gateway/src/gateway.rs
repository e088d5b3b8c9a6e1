//! The copilot reply pipeline.
//!
//! A request flows through: validate → quick-action check → build prompt →
//! call provider → normalize. Nothing survives between requests; the
//! roster context and quick-action table are read-only after startup.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use rostering_core::{Message, QuickActions, RosterContext};

use crate::error::GatewayError;
use crate::prompt::{build_system_prompt, to_completion_messages};
use crate::upstream::{CompletionProvider, CompletionRequest, UpstreamError};

pub use rostering_core::{NO_RESPONSE_REPLY, UPSTREAM_FAILURE_REPLY};

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Canned quick-action answer; no provider call was made.
    QuickAction,
    /// Text generated by the provider.
    Completion,
    /// Provider succeeded but returned nothing usable.
    EmptyCompletion,
    /// Provider failed; the text is the fixed fallback.
    Fallback,
}

/// A single assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text shown to the user.
    pub text: String,
    /// How the text was produced.
    pub source: ReplySource,
}

impl Reply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Whether the reply is a substitute for a real answer.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self.source,
            ReplySource::EmptyCompletion | ReplySource::Fallback
        )
    }
}

/// Fixed parameters of every provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    /// Provider model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Roster rows per sheet embedded into the system prompt.
    pub preview_rows: usize,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            preview_rows: 5,
        }
    }
}

/// Turns a conversation plus static context into exactly one reply.
pub struct Gateway {
    provider: Arc<dyn CompletionProvider>,
    roster: Arc<RosterContext>,
    quick_actions: QuickActions,
    settings: CompletionSettings,
}

impl Gateway {
    /// Create a gateway with the default quick actions and settings.
    pub fn new(provider: Arc<dyn CompletionProvider>, roster: Arc<RosterContext>) -> Self {
        Self {
            provider,
            roster,
            quick_actions: QuickActions::default(),
            settings: CompletionSettings::default(),
        }
    }

    /// Override model, temperature and preview size.
    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The quick-action table answered without a provider call.
    pub fn quick_actions(&self) -> &QuickActions {
        &self.quick_actions
    }

    /// Compute the assistant reply for `messages`.
    ///
    /// Only an empty conversation is an error. Provider failures resolve to
    /// a [`ReplySource::Fallback`] reply.
    pub async fn get_reply(&self, messages: &[Message]) -> Result<Reply, GatewayError> {
        let last = messages
            .last()
            .ok_or_else(|| GatewayError::invalid_request("Conversation must not be empty"))?;

        if last.is_user() {
            if let Some(answer) = self.quick_actions.answer(&last.text) {
                info!(label = %last.text, "Answering quick action");
                return Ok(Reply::new(answer, ReplySource::QuickAction));
            }
        }

        match self.complete(messages).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                error!(error = %e, "Completion provider error");
                Ok(Reply::new(UPSTREAM_FAILURE_REPLY, ReplySource::Fallback))
            }
        }
    }

    /// Assemble the provider request for a conversation.
    pub fn build_request(&self, messages: &[Message]) -> CompletionRequest {
        let system_prompt = build_system_prompt(&self.roster, self.settings.preview_rows);
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: to_completion_messages(system_prompt, messages),
            temperature: self.settings.temperature,
        }
    }

    async fn complete(&self, messages: &[Message]) -> Result<Reply, UpstreamError> {
        let request = self.build_request(messages);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Forwarding conversation to completion provider"
        );

        let response = self.provider.complete(&request).await?;

        Ok(match response.first_content() {
            Some(text) => Reply::new(text, ReplySource::Completion),
            None => {
                warn!("Completion provider returned no content");
                Reply::new(NO_RESPONSE_REPLY, ReplySource::EmptyCompletion)
            }
        })
    }
}

/// Extract the conversation from a raw request body.
///
/// Fails when `messages` is absent, not an array, empty, or holds an element
/// that is not a `{ role, text }` message with a known role.
pub fn parse_messages(body: &Value) -> Result<Vec<Message>, GatewayError> {
    let items = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::invalid_request("Invalid message format"))?;

    if items.is_empty() {
        return Err(GatewayError::invalid_request("Conversation must not be empty"));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Message::deserialize(item)
                .map_err(|e| GatewayError::invalid_request(format!("Invalid message at index {i}: {e}")))
        })
        .collect()
}
