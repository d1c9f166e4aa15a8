//! codec::export
//!
//! Declaration text, JSON companion, and file export.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::prune::prune_empty_lists;
use super::CodecError;
use crate::core::schema::Schema;

/// First line of every exported declaration.
pub const DECLARATION_HEADER: &str = "import { Schema, SchemaItem } from '@/types/schema';";

/// Paths written by [`export_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub declaration: PathBuf,
    pub json: PathBuf,
}

/// Identifier stem for a form type: every char outside `[A-Za-z0-9_]`
/// becomes `_`.
pub fn declaration_name(form_type: &str) -> String {
    form_type
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// The schema as an export-ready JSON value (callables dropped, noise
/// lists pruned).
pub fn to_export_value(schema: &Schema) -> Result<Value, CodecError> {
    let lossy = schema.lossy_items();
    if !lossy.is_empty() {
        tracing::warn!(
            items = ?lossy.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            "callable transforms are not exported"
        );
    }

    let mut value = serde_json::to_value(schema).map_err(CodecError::Serialize)?;
    prune_empty_lists(&mut value);
    Ok(value)
}

fn pretty(value: &Value) -> Result<String, CodecError> {
    serde_json::to_string_pretty(value).map_err(CodecError::Serialize)
}

/// Render the declaration-wrapped text for `schema`.
///
/// Deterministic: an unchanged schema renders byte-identically.
pub fn export_declaration(schema: &Schema, form_type: &str) -> Result<String, CodecError> {
    let name = declaration_name(form_type);
    let literal = pretty(&to_export_value(schema)?)?;
    Ok(format!(
        "{header}\n\nexport const {name}_schema: Schema = {literal};\n\nexport default {name}_schema;",
        header = DECLARATION_HEADER,
    ))
}

/// Render the JSON companion (the bare literal, same sanitizing rules).
pub fn export_json(schema: &Schema) -> Result<String, CodecError> {
    pretty(&to_export_value(schema)?)
}

/// Write `<name>_schema.ts` and `<name>_schema.json` into `dir`.
///
/// Creates `dir` if needed.
pub fn export_to_dir(
    schema: &Schema,
    form_type: &str,
    dir: &Path,
) -> Result<ExportedFiles, CodecError> {
    let name = declaration_name(form_type);
    let files = ExportedFiles {
        declaration: dir.join(format!("{}_schema.ts", name)),
        json: dir.join(format!("{}_schema.json", name)),
    };

    fs::create_dir_all(dir).map_err(|source| CodecError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    for (path, contents) in [
        (&files.declaration, export_declaration(schema, form_type)?),
        (&files.json, export_json(schema)?),
    ] {
        fs::write(path, contents).map_err(|source| CodecError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote export");
    }

    Ok(files)
}
