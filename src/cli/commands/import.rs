//! import command - Parse an edited declaration back into a schema

use std::path::Path;

use anyhow::{Context, Result};

use super::{read_input, render_schema, write_schema};
use crate::codec;
use crate::ui::output::{self, Verbosity};

/// Import a declaration and print (or write) the schema.
pub fn import(file: &Path, output_path: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    let text = read_input(file)?;
    let schema = codec::import_declaration(&text)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    match output_path {
        Some(path) => {
            write_schema(path, &schema)?;
            output::success(
                format!("Imported {} items into {}", schema.len(), path.display()),
                verbosity,
            );
        }
        None => output::emit(render_schema(&schema)?),
    }
    Ok(())
}
