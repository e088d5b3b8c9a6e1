//! HTTP request and response types.

use serde::Serialize;

/// Body of a chat reply (success, empty completion, or upstream fallback).
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Labels the chat panel renders as buttons.
#[derive(Debug, Serialize)]
pub struct QuickActionsResponse {
    pub quick_actions: Vec<String>,
    pub suggestions: Vec<String>,
}
