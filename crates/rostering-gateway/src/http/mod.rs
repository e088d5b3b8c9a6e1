//! HTTP server for the gateway.
//!
//! Provides endpoints for:
//! - Copilot chat (`/api/ai`)
//! - Quick-action labels (`/api/quick-actions`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for browser-hosted panels
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/ai", post(handlers::chat))
        .route("/api/quick-actions", get(handlers::list_quick_actions))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use rostering_core::RosterContext;

    use crate::gateway::Gateway;
    use crate::testing::{FakeOutcome, FakeProvider};

    fn app(outcome: FakeOutcome) -> (Router, Arc<FakeProvider>) {
        let provider = Arc::new(FakeProvider::new(outcome));
        let gateway = Gateway::new(provider.clone(), Arc::new(RosterContext::empty()));
        (create_router(AppState::new(gateway)), provider)
    }

    async fn post_chat(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn conversation(last: &str) -> String {
        json!({"messages": [
            {"id": "a1", "role": "assistant", "text": "Hi! I can help with coverage, compliance checks, and quick reports."},
            {"id": "u1", "role": "user", "text": last},
        ]})
        .to_string()
    }

    #[tokio::test]
    async fn test_quick_action_returns_canned_reply() {
        let (app, provider) = app(FakeOutcome::Content("unused"));
        let (status, body) = post_chat(app, conversation("Compliance Audit")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"reply": "Checks for any violations like insufficient rest or overbooked shifts."})
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_free_text_is_forwarded() {
        let (app, provider) = app(FakeOutcome::Content("ICU needs one more senior nurse."));
        let (status, body) = post_chat(app, conversation("Find coverage gaps")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "ICU needs one more senior nurse.");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.requests()[0].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_fallback() {
        let (app, _provider) = app(FakeOutcome::Status(503));
        let (status, body) = post_chat(app, conversation("hello")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"reply": "AI API error occurred."}));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_500_with_fallback() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = crate::upstream::OpenAiClient::new(&base, "ROSTERING_TEST_UNSET_KEY");
        let gateway = Gateway::new(Arc::new(client), Arc::new(RosterContext::empty()));
        let app = create_router(AppState::new(gateway));

        let (status, body) = post_chat(app, conversation("Who is on nights?")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"reply": "AI API error occurred."}));
    }

    #[tokio::test]
    async fn test_empty_completion_is_200_with_no_response() {
        let (app, _provider) = app(FakeOutcome::Empty);
        let (status, body) = post_chat(app, conversation("hello")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "No response from AI."}));
    }

    #[tokio::test]
    async fn test_bad_payloads_are_400_without_upstream_call() {
        let payloads = [
            json!({}).to_string(),
            json!({"messages": "Check Coverage"}).to_string(),
            json!({"messages": []}).to_string(),
            "{not json".to_string(),
        ];

        for payload in payloads {
            let (app, provider) = app(FakeOutcome::Content("unused"));
            let (status, body) = post_chat(app, payload.clone()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert!(body["error"].is_string(), "payload: {payload}");
            assert_eq!(provider.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_messages_error_text() {
        let (app, _provider) = app(FakeOutcome::Empty);
        let (status, body) = post_chat(app, json!({"msgs": []}).to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid message format"}));
    }

    #[tokio::test]
    async fn test_list_quick_actions() {
        let (app, _provider) = app(FakeOutcome::Empty);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/quick-actions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["quick_actions"].as_array().unwrap().len(), 6);
        assert_eq!(body["quick_actions"][0], "Check Coverage");
        assert_eq!(body["suggestions"][1], "Find coverage gaps");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _provider) = app(FakeOutcome::Empty);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
