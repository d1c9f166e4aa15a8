//! generator
//!
//! The attribute generation pipeline around the sanitizer.
//!
//! # Flow
//!
//! 1. Reject a request with a blank intent or group type
//! 2. Build the system and user prompts from the sanitizer's rule tables
//! 3. Call the [`AttributeGenerator`] once (no retries)
//! 4. Extract JSON from the reply: the whole reply, else the span from the
//!    first `{` to the last `}`
//! 5. Sanitize for the declared field type
//! 6. Write exactly one [`AuditRecord`]
//! 7. On any failure after step 1, return the degraded record
//!    `{display_name: "Field", width: 12}` with the reason attached
//!
//! Log lines for one call carry its `request_id` through a tracing span, so
//! the paired `sent`/`received` lines and sanitizer warnings correlate with
//! the audit record.
//!
//! # Example
//!
//! ```
//! use formblocks::audit::MemoryAuditSink;
//! use formblocks::core::types::InputType;
//! use formblocks::generator::mock::MockGenerator;
//! use formblocks::generator::{AttributeService, GenerationRequest};
//!
//! # tokio_test::block_on(async {
//! let service = AttributeService::new(MemoryAuditSink::new());
//! let generator = MockGenerator::replying(r#"{"display_name": "Phone", "width": 6}"#);
//! let request = GenerationRequest::new("buyer phone", InputType::Text, "single");
//!
//! let outcome = service.generate(&generator, &request).await.unwrap();
//! assert_eq!(outcome.attributes.display_name(), "Phone");
//! assert!(!outcome.is_fallback());
//! # });
//! ```

pub mod mock;
pub mod openai;
pub mod prompt;
pub mod traits;

pub use traits::{AttributeGenerator, ChatMessage, ChatRequest, ChatResponse, GeneratorError, Role};

use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;

use crate::audit::{AuditRecord, AuditRequest, AuditResponse, AuditSink, RequestId};
use crate::core::config::{Config, DEFAULT_MAX_COMPLETION_TOKENS, DEFAULT_MODEL};
use crate::core::types::{InputType, UtcTimestamp};
use crate::sanitize::{sanitize, CleanedAttributes, SanitizeError, SanitizeWarning, Sanitized};

/// Errors from the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request itself is incomplete; nothing was called or audited.
    #[error("missing required request field '{0}'")]
    MissingRequestField(&'static str),

    #[error("generator call failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("generator returned no content")]
    EmptyResponse,

    #[error("generator reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("generator reply rejected: {0}")]
    Sanitize(#[from] SanitizeError),
}

/// What the caller wants generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Free-form description of the field
    pub intent: String,
    pub field_type: InputType,
    pub group_type: String,
    /// Accepted but not sent; only its presence is audited
    pub screenshot: Option<String>,
    /// Source field names for context
    pub pdf_context: Vec<String>,
}

impl GenerationRequest {
    pub fn new(
        intent: impl Into<String>,
        field_type: InputType,
        group_type: impl Into<String>,
    ) -> Self {
        Self {
            intent: intent.into(),
            field_type,
            group_type: group_type.into(),
            screenshot: None,
            pdf_context: Vec::new(),
        }
    }

    pub fn with_context(mut self, pdf_context: Vec<String>) -> Self {
        self.pdf_context = pdf_context;
        self
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.intent.trim().is_empty() {
            return Err(GenerationError::MissingRequestField("intent"));
        }
        if self.group_type.trim().is_empty() {
            return Err(GenerationError::MissingRequestField("group_type"));
        }
        Ok(())
    }

    fn audit_view(&self) -> AuditRequest {
        AuditRequest {
            intent: self.intent.clone(),
            field_type: self.field_type.to_string(),
            group_type: self.group_type.clone(),
            has_screenshot: self.screenshot.is_some(),
        }
    }
}

/// Model parameters sent with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_completion_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
        }
    }
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.generator_model().to_string(),
            max_completion_tokens: config.generator_max_completion_tokens(),
        }
    }
}

/// Result of one pipeline pass. Always carries a usable record.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub request_id: RequestId,
    /// Cleaned record, or the degraded default on failure
    pub attributes: CleanedAttributes,
    pub warnings: Vec<SanitizeWarning>,
    /// Why the default was returned, if it was
    pub failure: Option<GenerationError>,
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// Parse a reply as JSON, falling back to its outermost `{...}` span.
pub fn extract_json(reply: &str) -> Result<Value, GenerationError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let whole_err = match serde_json::from_str(reply) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str(&reply[start..=end]).map_err(GenerationError::InvalidJson)
        }
        _ => Err(GenerationError::InvalidJson(whole_err)),
    }
}

/// Parsed value (if parsing got that far) and the sanitizing result.
fn clean(
    content: Option<&str>,
    field_type: InputType,
) -> (Option<Value>, Result<Sanitized, GenerationError>) {
    let Some(content) = content else {
        return (None, Err(GenerationError::EmptyResponse));
    };
    match extract_json(content) {
        Ok(parsed) => {
            let result = sanitize(&parsed, field_type).map_err(GenerationError::from);
            (Some(parsed), result)
        }
        Err(e) => (None, Err(e)),
    }
}

/// Runs generation passes and audits each one.
#[derive(Debug, Clone)]
pub struct AttributeService<S: AuditSink> {
    sink: S,
    settings: GenerationSettings,
}

impl<S: AuditSink> AttributeService<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Generate attributes for `request` with `generator`.
    ///
    /// # Errors
    ///
    /// Only `MissingRequestField`. Every later failure is reported in
    /// [`GenerationOutcome::failure`] next to the degraded record.
    pub async fn generate(
        &self,
        generator: &dyn AttributeGenerator,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        request.validate()?;
        let request_id = RequestId::new();
        let span = tracing::info_span!("generate", %request_id, generator = generator.name());

        let outcome = async {
            let started = Instant::now();
            if request.screenshot.is_some() {
                tracing::debug!("ignoring screenshot");
            }

            let chat = prompt::build_request(request, &self.settings);
            let sent = serde_json::to_value(&chat).ok();
            tracing::debug!(model = %chat.model, messages = chat.messages.len(), "sent");

            let (received, parsed, result) = match generator.complete(&chat).await {
                Ok(reply) => {
                    tracing::debug!(has_content = reply.content.is_some(), "received");
                    let (parsed, result) = clean(reply.content.as_deref(), request.field_type);
                    (Some(reply.raw), parsed, result)
                }
                Err(e) => {
                    tracing::error!(error = %e, "generator call failed");
                    (e.payload().cloned(), None, Err(e.into()))
                }
            };

            self.finish(request_id, request, started, sent, received, parsed, result)
                .await
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }

    /// Sanitize a reply obtained elsewhere, auditing it like a generated one.
    ///
    /// # Errors
    ///
    /// Only `MissingRequestField`, as for [`generate`](Self::generate).
    pub async fn sanitize_reply(
        &self,
        request: &GenerationRequest,
        reply: &str,
    ) -> Result<GenerationOutcome, GenerationError> {
        request.validate()?;
        let request_id = RequestId::new();
        let span = tracing::info_span!("sanitize", %request_id);

        let outcome = async {
            let started = Instant::now();
            let (parsed, result) = clean(Some(reply), request.field_type);
            let received = Some(Value::String(reply.to_string()));
            self.finish(request_id, request, started, None, received, parsed, result)
                .await
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }

    #[allow(clippy::too_many_arguments)]
    async fn finish(
        &self,
        request_id: RequestId,
        request: &GenerationRequest,
        started: Instant,
        sent: Option<Value>,
        received: Option<Value>,
        parsed: Option<Value>,
        result: Result<Sanitized, GenerationError>,
    ) -> GenerationOutcome {
        let (response, outcome) = match result {
            Ok(Sanitized {
                attributes,
                warnings,
            }) => (
                AuditResponse::success(attributes.clone().into_value()),
                GenerationOutcome {
                    request_id,
                    attributes,
                    warnings,
                    failure: None,
                },
            ),
            Err(error) => {
                tracing::warn!(%error, "returning default attributes");
                (
                    AuditResponse::failure(error.to_string(), parsed),
                    GenerationOutcome {
                        request_id,
                        attributes: CleanedAttributes::fallback(),
                        warnings: Vec::new(),
                        failure: Some(error),
                    },
                )
            }
        };

        let record = AuditRecord {
            timestamp: UtcTimestamp::now(),
            request_id,
            request: request.audit_view(),
            response,
            sent_payload: sent,
            received_payload: received,
            duration: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        if let Err(e) = self.sink.record(&record).await {
            tracing::error!(error = %e, "failed to write audit record");
        }

        tracing::debug!(duration_ms = record.duration, success = record.response.success, "done");
        outcome
    }
}
