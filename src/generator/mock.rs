//! generator::mock
//!
//! Mock generator for testing.
//!
//! Returns queued replies in order and records every request it receives.
//! Once the queue is empty it answers with a completion that has no content.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::json;

use super::traits::{AttributeGenerator, ChatRequest, ChatResponse, GeneratorError};

/// Mock generator.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    inner: Arc<Mutex<MockGeneratorInner>>,
}

#[derive(Debug, Default)]
struct MockGeneratorInner {
    /// Reply texts, consumed front to back.
    replies: VecDeque<String>,
    /// Error returned by every call while set.
    fail_with: Option<GeneratorError>,
    /// Recorded requests for verification.
    calls: Vec<ChatRequest>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that answers once with `reply`.
    ///
    /// # Example
    ///
    /// ```
    /// use formblocks::generator::mock::MockGenerator;
    ///
    /// let generator = MockGenerator::replying(r#"{"display_name": "Phone"}"#);
    /// assert!(generator.calls().is_empty());
    /// ```
    pub fn replying(reply: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.push_reply(reply);
        generator
    }

    /// Queue another reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock().replies.push_back(reply.into());
    }

    /// Fail every call with `error`.
    pub fn fail_with(self, error: GeneratorError) -> Self {
        self.lock().fail_with = Some(error);
        self
    }

    /// All requests received so far.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockGeneratorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AttributeGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GeneratorError> {
        let mut inner = self.lock();
        inner.calls.push(request.clone());

        if let Some(error) = &inner.fail_with {
            return Err(error.clone());
        }

        let body = match inner.replies.pop_front() {
            Some(text) => json!({
                "choices": [{ "message": { "role": "assistant", "content": text } }]
            }),
            None => json!({ "choices": [] }),
        };
        Ok(ChatResponse::from_body(body))
    }
}
