//! coords command - Report source field coordinates

use std::path::Path;

use anyhow::{Context, Result};

use super::load_schema;
use crate::ui::output;
use crate::ui::report::{collect_coordinates, format_coordinates, CoordsFormat};

pub fn coords(schema_path: &Path, format: CoordsFormat) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let fields = collect_coordinates(&schema);
    if fields.is_empty() && format != CoordsFormat::Json {
        output::emit("No coordinates found");
        return Ok(());
    }
    output::emit(format_coordinates(&fields, format).context("Failed to render coordinates")?);
    Ok(())
}
