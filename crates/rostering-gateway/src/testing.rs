//! In-memory completion provider for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::upstream::{CompletionProvider, CompletionRequest, CompletionResponse, UpstreamError};

/// What the fake provider answers with.
pub enum FakeOutcome {
    Content(&'static str),
    Empty,
    Status(u16),
    Decode,
}

/// Records every request and answers with a fixed outcome.
pub struct FakeProvider {
    outcome: FakeOutcome,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeProvider {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.outcome {
            FakeOutcome::Content(text) => Ok(CompletionResponse::with_content(text)),
            FakeOutcome::Empty => Ok(CompletionResponse::default()),
            FakeOutcome::Status(status) => Err(UpstreamError::Status {
                status,
                body: String::new(),
            }),
            FakeOutcome::Decode => Err(UpstreamError::Decode("expected value".to_string())),
        }
    }
}
