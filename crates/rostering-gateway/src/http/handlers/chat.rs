//! Copilot chat handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use rostering_core::SUGGESTIONS;

use crate::error::GatewayError;
use crate::gateway::{parse_messages, ReplySource};
use crate::http::responses::{ErrorResponse, QuickActionsResponse, ReplyResponse};
use crate::state::AppState;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
        }
    }
}

/// POST /api/ai - Reply to a copilot conversation.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    json_result: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_result {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Invalid JSON in request body");
            return GatewayError::invalid_request("Invalid message format").into_response();
        }
    };

    let messages = match parse_messages(&body) {
        Ok(messages) => messages,
        Err(e) => {
            warn!(error = %e, "Rejected chat request");
            return e.into_response();
        }
    };

    info!(messages = messages.len(), "Received chat request");

    match state.gateway.get_reply(&messages).await {
        Ok(reply) => {
            info!(
                source = ?reply.source,
                degraded = reply.is_degraded(),
                "Replying to chat request"
            );
            let status = match reply.source {
                ReplySource::Fallback => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::OK,
            };
            (status, Json(ReplyResponse { reply: reply.text })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/quick-actions - Labels for the panel's buttons.
pub async fn list_quick_actions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(QuickActionsResponse {
        quick_actions: state
            .gateway
            .quick_actions()
            .labels()
            .map(String::from)
            .collect(),
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    })
}
