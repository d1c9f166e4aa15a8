//! generator::openai
//!
//! Chat-completions client.
//!
//! Posts a [`ChatRequest`] as JSON to a configurable endpoint with a bearer
//! key. Error statuses map to [`GeneratorError`] variants; nothing is
//! retried, and no timeout is imposed beyond the HTTP client's own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::traits::{AttributeGenerator, ChatRequest, ChatResponse, GeneratorError};
use crate::core::config::Config;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "formblocks";

/// Chat-completions generator.
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

// Custom Debug to avoid exposing the key
impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl OpenAiGenerator {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build from config, reading the key from the configured variable.
    ///
    /// # Errors
    ///
    /// `MissingApiKey` if the variable is unset or blank.
    pub fn from_config(config: &Config) -> Result<Self, GeneratorError> {
        let var = config.generator_api_key_env();
        let key = std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GeneratorError::MissingApiKey(var.to_string()))?;
        Ok(Self::new(config.generator_endpoint(), key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> Result<HeaderMap, GeneratorError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| GeneratorError::AuthFailed("API key is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    fn error_for_status(status: StatusCode, body: Option<Value>) -> GeneratorError {
        let message = body
            .as_ref()
            .and_then(|b| b.pointer("/error/message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GeneratorError::AuthFailed(message),
            StatusCode::TOO_MANY_REQUESTS => GeneratorError::RateLimited,
            _ if status.is_server_error() => GeneratorError::ApiError {
                status: status.as_u16(),
                message: format!("server error: {}", message),
                body,
            },
            _ => GeneratorError::ApiError {
                status: status.as_u16(),
                message,
                body,
            },
        }
    }
}

#[async_trait]
impl AttributeGenerator for OpenAiGenerator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GeneratorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Self::error_for_status(status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;
        Ok(ChatResponse::from_body(body))
    }
}
