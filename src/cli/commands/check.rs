//! check command - Verify schema invariants

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::verify::verify;
use crate::ui::{output, report};

/// Verify a schema file. Fails when any invariant is violated.
///
/// The file is read as a raw item list so duplicate ids are reported
/// alongside every other violation instead of stopping the load.
pub fn check(schema_path: &Path) -> Result<()> {
    let text = super::read_input(schema_path)?;
    let items: Vec<crate::core::schema::SchemaItem> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid schema in {}", schema_path.display()))?;

    let result = verify(&items);
    output::emit(report::format_verify(&result));
    if !result.ok {
        bail!("{} failed verification", schema_path.display());
    }
    Ok(())
}
