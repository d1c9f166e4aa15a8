//! codec
//!
//! Conversion between a [`Schema`] and its declaration-wrapped text form.
//!
//! # Format
//!
//! ```text
//! import { Schema, SchemaItem } from '@/types/schema';
//!
//! export const <name>_schema: Schema = <2-space indented JSON>;
//!
//! export default <name>_schema;
//! ```
//!
//! `<name>` is the form type with every character outside `[A-Za-z0-9_]`
//! replaced by `_`.
//!
//! # Export
//!
//! - Callable transforms never serialize; an export of a schema holding
//!   them is lossy, reported by [`Schema::lossy_items`] and a warning
//! - Empty `linked_form_fields_text`, `linked_dates`, `linkedFields` and
//!   `visibleIf` lists are omitted at any depth
//! - Key order follows the source records, so an unchanged schema exports
//!   byte-identically
//!
//! # Import
//!
//! The literal is located by its declaration signature, trailing commas
//! before a closing bracket are removed (the only repair attempted), and
//! the result is parsed and decoded item by item. Imported text is trusted:
//! items are not passed through the sanitizer.
//!
//! [`Schema`]: crate::core::schema::Schema
//! [`Schema::lossy_items`]: crate::core::schema::Schema::lossy_items

mod export;
mod import;
mod prune;

pub use export::{
    declaration_name, export_declaration, export_json, export_to_dir, to_export_value,
    ExportedFiles, DECLARATION_HEADER,
};
pub use import::{import_declaration, locate_literal, parse_literal, repair_trailing_commas};
pub use prune::{prune_empty_lists, PRUNED_WHEN_EMPTY};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::schema::SchemaError;

/// Errors from export and import.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("no `const <name>: Schema = [...]` declaration found")]
    SignatureNotFound,

    #[error("schema literal is malformed: {0}")]
    MalformedLiteral(#[source] serde_json::Error),

    #[error("schema literal is not a sequence")]
    NotASequence,

    #[error("item {index} is not a valid schema item: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to serialize schema: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
