//! export command - Render a schema as a declaration

use std::path::Path;

use anyhow::{Context, Result};

use super::load_schema;
use crate::codec;
use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Print the declaration (or JSON companion), or write both files.
///
/// With no `--out-dir` and no `--json`, a configured `export.out_dir` is
/// used; otherwise the declaration goes to stdout.
pub fn export(
    schema_path: &Path,
    form_type: &str,
    json: bool,
    out_dir: Option<&Path>,
    verbosity: Verbosity,
) -> Result<()> {
    let schema = load_schema(schema_path)?;

    for id in schema.lossy_items() {
        output::warn(
            format!("item '{}' has a callable transform that is not exported", id),
            verbosity,
        );
    }

    if json {
        output::emit(codec::export_json(&schema)?);
        return Ok(());
    }

    let config = Config::load().context("Failed to load config")?;
    let out_dir = out_dir.or_else(|| config.export_out_dir());

    match out_dir {
        Some(dir) => {
            let files = codec::export_to_dir(&schema, form_type, dir)?;
            output::success(
                format!(
                    "Wrote {} and {}",
                    files.declaration.display(),
                    files.json.display()
                ),
                verbosity,
            );
        }
        None => output::emit(codec::export_declaration(&schema, form_type)?),
    }
    Ok(())
}
