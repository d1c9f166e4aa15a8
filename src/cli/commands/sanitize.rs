//! sanitize command - Clean a raw attribute record

use std::path::Path;

use anyhow::{Context, Result};

use super::read_input;
use crate::audit::JsonlAuditSink;
use crate::core::config::Config;
use crate::core::types::InputType;
use crate::generator::{AttributeService, GenerationRequest};
use crate::ui::output::{self, Verbosity};

/// Sanitize the record in `raw` and print the cleaned record.
///
/// A record that cannot be cleaned prints the fallback attributes and a
/// warning; the pass is audited either way.
pub async fn sanitize(
    raw: &Path,
    input_type: InputType,
    intent: &str,
    group_type: &str,
    verbosity: Verbosity,
) -> Result<()> {
    let text = read_input(raw)?;
    let config = Config::load().context("Failed to load config")?;
    let sink = JsonlAuditSink::new(config.audit_path()?);

    let service = AttributeService::new(sink);
    let request = GenerationRequest::new(intent, input_type, group_type);
    let outcome = service.sanitize_reply(&request, &text).await?;

    for warning in &outcome.warnings {
        output::warn(warning, verbosity);
    }
    if let Some(failure) = &outcome.failure {
        output::warn(format!("using fallback attributes: {}", failure), verbosity);
    }

    output::emit(
        serde_json::to_string_pretty(&outcome.attributes)
            .context("Failed to serialize attributes")?,
    );
    Ok(())
}
