//! generator::traits
//!
//! The seam between the pipeline and a text-generation service.
//!
//! # Design
//!
//! `AttributeGenerator` is async because completion involves network I/O.
//! The pipeline only consumes the reply text; everything about transport,
//! authentication and retries belongs to the implementation (and the
//! shipped implementations never retry).
//!
//! # Example
//!
//! ```ignore
//! use formblocks::generator::{AttributeGenerator, ChatMessage, ChatRequest};
//!
//! async fn ask(generator: &dyn AttributeGenerator) -> Result<(), GeneratorError> {
//!     let request = ChatRequest {
//!         model: "gpt-5-mini".to_string(),
//!         messages: vec![ChatMessage::user("Return {\"display_name\": \"Name\"}")],
//!         max_completion_tokens: 200,
//!     };
//!     let reply = generator.complete(&request).await?;
//!     println!("{:?}", reply.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from generator calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    /// The configured key variable is unset or empty.
    #[error("API key not found in environment variable '{0}'")]
    MissingApiKey(String),

    /// The service rejected the key.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited")]
    RateLimited,

    /// The service returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
        /// Error body as returned, for the audit record
        body: Option<Value>,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A success status with a body that is not a completion.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl GeneratorError {
    /// Whatever the service sent back with the failure.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            GeneratorError::ApiError { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completions request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_completion_tokens: u32,
}

/// A completion reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Text of the first choice, if the reply had one
    pub content: Option<String>,
    /// Body exactly as received
    pub raw: Value,
}

impl ChatResponse {
    /// Build from a chat-completions response body.
    pub fn from_body(raw: Value) -> Self {
        let content = raw
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { content, raw }
    }
}

/// A text-generation service.
#[async_trait]
pub trait AttributeGenerator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Run one completion. Implementations do not retry.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GeneratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_from_first_choice() {
        let response = ChatResponse::from_body(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "{\"display_name\": \"A\"}" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }));
        assert_eq!(response.content.as_deref(), Some("{\"display_name\": \"A\"}"));
    }

    #[test]
    fn missing_content() {
        let response = ChatResponse::from_body(json!({ "choices": [] }));
        assert!(response.content.is_none());
    }

    #[test]
    fn request_serializes_as_chat_body() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            max_completion_tokens: 10,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "m",
                "messages": [
                    { "role": "system", "content": "s" },
                    { "role": "user", "content": "u" }
                ],
                "max_completion_tokens": 10
            })
        );
    }

    #[test]
    fn payload_only_for_api_errors() {
        let err = GeneratorError::ApiError {
            status: 400,
            message: "bad".into(),
            body: Some(json!({ "error": "bad" })),
        };
        assert!(err.payload().is_some());
        assert!(GeneratorError::RateLimited.payload().is_none());
    }
}
