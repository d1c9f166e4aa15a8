//! generate command - Ask the configured generator for display attributes

use anyhow::{Context, Result};

use crate::audit::JsonlAuditSink;
use crate::core::config::Config;
use crate::core::types::InputType;
use crate::generator::openai::OpenAiGenerator;
use crate::generator::{AttributeService, GenerationRequest, GenerationSettings};
use crate::ui::output::{self, Verbosity};

pub async fn generate(
    intent: &str,
    field_type: InputType,
    group_type: &str,
    context: Vec<String>,
    verbosity: Verbosity,
) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let generator = OpenAiGenerator::from_config(&config)?;
    let sink = JsonlAuditSink::new(config.audit_path()?);

    let service =
        AttributeService::new(sink).with_settings(GenerationSettings::from_config(&config));
    let request = GenerationRequest::new(intent, field_type, group_type).with_context(context);
    let outcome = service.generate(&generator, &request).await?;

    for warning in &outcome.warnings {
        output::warn(warning, verbosity);
    }
    if let Some(failure) = &outcome.failure {
        output::warn(format!("using fallback attributes: {}", failure), verbosity);
    }
    output::success(format!("request {}", outcome.request_id), verbosity);

    output::emit(
        serde_json::to_string_pretty(&outcome.attributes)
            .context("Failed to serialize attributes")?,
    );
    Ok(())
}
