//! Chat panel state: visibility, composer draft, and the transcript.
//!
//! The transcript is append-only. A fresh panel holds a single assistant
//! greeting; [`ChatPanel::reset`] is the only way to shrink it.

use tracing::{debug, warn};

use rostering_core::{Message, TranscriptEntry, GREETING, UPSTREAM_FAILURE_REPLY};

use crate::http::ChatTransport;

/// Client-side copilot chat panel.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    open: bool,
    draft: String,
    transcript: Vec<TranscriptEntry>,
}

impl ChatPanel {
    /// A closed panel holding only the greeting.
    pub fn new() -> Self {
        Self {
            open: false,
            draft: String::new(),
            transcript: vec![TranscriptEntry::new(Message::assistant(GREETING))],
        }
    }

    /// Whether the panel is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the panel. The transcript is kept.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel. The transcript is kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Flip visibility. The transcript is kept.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Current composer text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the composer text.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Every entry so far, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The transcript as sent to the gateway.
    pub fn conversation(&self) -> Vec<Message> {
        self.transcript.iter().map(|e| e.message.clone()).collect()
    }

    /// Discard everything and start over with the greeting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Append a user message and clear the draft.
    ///
    /// Returns the conversation to send, or `None` when `text` is blank.
    pub fn push_user(&mut self, text: &str) -> Option<Vec<Message>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let entry = TranscriptEntry::new(Message::user(trimmed));
        debug!(id = %entry.id, "Appended user message");
        self.transcript.push(entry);
        self.draft.clear();
        Some(self.conversation())
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.transcript
            .push(TranscriptEntry::new(Message::assistant(text)));
    }

    /// Send `text` and append the reply. Blank input is ignored.
    ///
    /// Returns whether anything was sent.
    pub async fn send_user_text<T>(&mut self, transport: &T, text: &str) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(conversation) = self.push_user(text) else {
            return false;
        };

        let reply = reply_or_fallback(transport, &conversation).await;
        self.push_assistant(reply);
        true
    }

    /// Send the current draft. A blank draft is left untouched.
    pub async fn send_draft<T>(&mut self, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let draft = self.draft.clone();
        self.send_user_text(transport, &draft).await
    }

    /// Quick actions are pre-filled user messages; the gateway answers them.
    pub async fn run_quick_action<T>(&mut self, transport: &T, label: &str) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        self.send_user_text(transport, label).await
    }
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a reply, substituting the fixed failure text on any transport error.
pub(crate) async fn reply_or_fallback<T>(transport: &T, conversation: &[Message]) -> String
where
    T: ChatTransport + ?Sized,
{
    match transport.fetch_reply(conversation).await {
        Ok(reply) => {
            debug!(reply_len = reply.len(), "Received copilot reply");
            reply
        }
        Err(e) => {
            warn!(error = %e, "Copilot request failed");
            UPSTREAM_FAILURE_REPLY.to_string()
        }
    }
}
