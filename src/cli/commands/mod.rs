//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads its input files
//! 2. Calls the library to do the work
//! 3. Formats and displays output
//!
//! `sanitize` and `generate` are async because the audit sink and the
//! generator client are.

mod block;
mod blocks;
mod check;
mod completion;
mod config_cmd;
mod coords;
mod export;
mod generate;
mod import;
mod sanitize;

pub use block::block;
pub use blocks::blocks;
pub use check::check;
pub use completion::completion;
pub use config_cmd::config;
pub use coords::coords;
pub use export::export;
pub use generate::generate;
pub use import::import;
pub use sanitize::sanitize;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::args::Command;
use crate::core::schema::Schema;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub async fn dispatch(command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Export {
            schema,
            form_type,
            json,
            out_dir,
        } => export(&schema, &form_type, json, out_dir.as_deref(), verbosity),
        Command::Import { file, output } => import(&file, output.as_deref(), verbosity),
        Command::Check { schema } => check(&schema),
        Command::Blocks { schema } => blocks(&schema),
        Command::Block { action } => block(action, verbosity),
        Command::Sanitize {
            raw,
            input_type,
            intent,
            group_type,
        } => sanitize(&raw, input_type, &intent, &group_type, verbosity).await,
        Command::Generate {
            intent,
            field_type,
            group_type,
            context,
        } => generate(&intent, field_type, &group_type, context, verbosity).await,
        Command::Coords { schema, format } => coords(&schema, format),
        Command::Config { action } => config(action, verbosity),
        Command::Completion { shell } => completion(shell),
    }
}

/// Read a whole input file; `-` reads stdin.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load a schema file (JSON list of items).
pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
    let text = read_input(path)?;
    serde_json::from_str(&text).with_context(|| format!("Invalid schema in {}", path.display()))
}

/// Pretty JSON for a schema, as stored on disk.
pub(crate) fn render_schema(schema: &Schema) -> Result<String> {
    serde_json::to_string_pretty(schema).context("Failed to serialize schema")
}

/// Write a schema file: temp file in the same directory, then rename.
pub(crate) fn write_schema(path: &Path, schema: &Schema) -> Result<()> {
    let text = render_schema(schema)?;
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, text).with_context(|| format!("Failed to write {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), items = schema.len(), "wrote schema");
    Ok(())
}
