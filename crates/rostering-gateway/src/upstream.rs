//! Completion provider client.
//!
//! The gateway talks to the provider through the [`CompletionProvider`]
//! trait so tests can substitute an in-memory fake. [`OpenAiClient`] is the
//! production implementation for any OpenAI-compatible
//! `/chat/completions` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rostering_core::ChatRole;

/// One message of the outbound conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionMessage {
    pub role: ChatRole,
    pub content: String,
}

impl CompletionMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,

    /// System prompt followed by the conversation.
    pub messages: Vec<CompletionMessage>,

    /// Sampling temperature.
    pub temperature: f32,
}

/// The subset of the provider response the gateway reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

/// A single completion choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Message payload of a completion choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Response carrying a single choice with the given content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            choices: Some(vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
            }]),
        }
    }

    /// Text of the first choice, if present and non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_deref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

/// Failures talking to the completion provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS or I/O failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider body was not the expected JSON.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

/// Something that can turn a conversation into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Perform exactly one completion round-trip.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError>;
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    inner: reqwest::Client,
    api_base: String,
    api_key_env: String,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// The API key is read from `api_key_env` on every call, not here.
    pub fn new(api_base: &str, api_key_env: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key_env: api_key_env.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    // A missing key is sent as-is; the provider rejects it.
    fn api_key(&self) -> String {
        std::env::var(&self.api_key_env).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        let url = self.endpoint();
        debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "POST completion request"
        );

        let response = self
            .inner
            .post(&url)
            .bearer_auth(self.api_key())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    /// Spawn a provider stub answering every request with `status` and `body`.
    async fn spawn_provider(status: StatusCode, body: &'static str) -> (String, Captured) {
        let captured = Captured::default();

        let handler = move |State(captured): State<Captured>, headers: HeaderMap, Json(req): Json<Value>| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            captured.requests.lock().unwrap().push((auth, req));
            (status, body).into_response()
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(handler))
            .with_state(captured.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1", addr), captured)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                CompletionMessage::new(ChatRole::System, "be helpful"),
                CompletionMessage::new(ChatRole::User, "who is on nights?"),
            ],
            temperature: 0.7,
        }
    }

    #[test]
    fn test_first_content() {
        assert_eq!(
            CompletionResponse::with_content("hi").first_content(),
            Some("hi")
        );
        assert_eq!(CompletionResponse::default().first_content(), None);
        assert_eq!(
            CompletionResponse::with_content("").first_content(),
            None
        );

        let no_message: CompletionResponse =
            serde_json::from_value(json!({"choices": [{}]})).unwrap();
        assert_eq!(no_message.first_content(), None);

        let null_choices: CompletionResponse =
            serde_json::from_value(json!({"choices": null})).unwrap();
        assert_eq!(null_choices.first_content(), None);
    }

    #[test]
    fn test_request_wire_format() {
        let body = serde_json::to_value(request()).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "who is on nights?");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_key_and_parses_reply() {
        let (base, captured) = spawn_provider(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"Ward 3 is short."}}]}"#,
        )
        .await;
        std::env::set_var("ROSTERING_TEST_KEY_OK", "sk-test");
        let client = OpenAiClient::new(&base, "ROSTERING_TEST_KEY_OK");

        let response = client.complete(&request()).await.unwrap();
        assert_eq!(response.first_content(), Some("Ward 3 is short."));

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.as_deref(), Some("Bearer sk-test"));
        assert_eq!(requests[0].1["messages"][1]["role"], "user");
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let (base, _captured) =
            spawn_provider(StatusCode::UNAUTHORIZED, r#"{"error":{"message":"bad key"}}"#).await;
        let client = OpenAiClient::new(&base, "ROSTERING_TEST_KEY_UNSET");

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_complete_maps_garbage_body() {
        let (base, _captured) = spawn_provider(StatusCode::OK, "<html>oops</html>").await;
        let client = OpenAiClient::new(&base, "ROSTERING_TEST_KEY_UNSET");

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_complete_maps_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenAiClient::new(&format!("http://{}/v1", addr), "ROSTERING_TEST_KEY_UNSET");
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
