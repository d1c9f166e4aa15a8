//! blocks command - Show the computed block view

use std::path::Path;

use anyhow::Result;

use super::load_schema;
use crate::core::blocks::view;
use crate::ui::{output, report};

pub fn blocks(schema_path: &Path) -> Result<()> {
    let schema = load_schema(schema_path)?;
    output::emit(report::format_block_view(&view(&schema)));
    Ok(())
}
