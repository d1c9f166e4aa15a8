//! core::verify
//!
//! Full invariant check of a schema value.
//!
//! [`Schema`] construction already rejects duplicate ids, and the block
//! engine keeps styles consistent by construction. Schemas that arrive by
//! other routes (hand-edited imports, extraction output) can still break the
//! grouping invariants, so this module reports every violation it finds.
//!
//! # Invariants checked
//!
//! - `unique_id` values are unique
//! - an item without `block` has no `block_style`
//! - all members of a block carry the same `block_style`
//!
//! # Invariants
//!
//! - Never mutates the schema
//! - Deterministic: violations are reported in schema order

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::schema::{BlockStyle, SchemaItem};
use crate::core::types::{BlockName, UniqueId};

/// A single invariant violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("duplicate unique_id '{0}'")]
    DuplicateId(UniqueId),

    #[error("item '{0}' has a block_style but no block")]
    StyleWithoutBlock(UniqueId),

    #[error("item '{item}' in block '{block}' has a style that differs from the block's")]
    InconsistentStyle { block: BlockName, item: UniqueId },
}

/// Result of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Violations found
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a result from collected errors.
    pub fn from_errors(errors: Vec<VerifyError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

/// Verify a sequence of items.
///
/// Takes a slice rather than a `Schema` so that raw decoded items, which may
/// still contain duplicates, can be checked too.
pub fn verify(items: &[SchemaItem]) -> VerifyResult {
    let mut errors = Vec::new();
    let mut seen: HashSet<&UniqueId> = HashSet::new();
    let mut block_styles: HashMap<&BlockName, Option<&BlockStyle>> = HashMap::new();

    for item in items {
        if !seen.insert(&item.unique_id) {
            errors.push(VerifyError::DuplicateId(item.unique_id.clone()));
        }

        let attrs = &item.display_attributes;
        match &attrs.block {
            None if attrs.block_style.is_some() => {
                errors.push(VerifyError::StyleWithoutBlock(item.unique_id.clone()));
            }
            None => {}
            Some(block) => {
                let style = attrs.block_style.as_ref();
                let first = *block_styles.entry(block).or_insert(style);
                if first != style {
                    errors.push(VerifyError::InconsistentStyle {
                        block: block.clone(),
                        item: item.unique_id.clone(),
                    });
                }
            }
        }
    }

    VerifyResult::from_errors(errors)
}
