//! System prompt assembly and outbound message mapping.

use tracing::warn;

use rostering_core::{ChatRole, Message, RosterContext};

use crate::upstream::CompletionMessage;

const PERSONA: &str = "\
You are the AI Copilot for Sengkang General Hospital's Nurse Rostering System.

Use the following roster data to answer questions about schedules, shifts, duties, coverage, and compliance.

If data is incomplete, respond with logical scheduling guidance and suggest next steps.";

/// Build the system prompt: persona text plus a bounded roster preview.
pub fn build_system_prompt(roster: &RosterContext, rows_per_sheet: usize) -> String {
    let preview = roster.preview_json(rows_per_sheet).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize roster preview");
        "{}".to_string()
    });

    format!("{PERSONA}\n\nHere is a sample of the loaded roster data:\n{preview}\n")
}

/// Prefix the conversation with the system prompt, mapping `text` to `content`.
pub fn to_completion_messages(system_prompt: String, messages: &[Message]) -> Vec<CompletionMessage> {
    std::iter::once(CompletionMessage::new(ChatRole::System, system_prompt))
        .chain(
            messages
                .iter()
                .map(|m| CompletionMessage::new(ChatRole::from(m.role), m.text.clone())),
        )
        .collect()
}
