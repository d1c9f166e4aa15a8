//! block command - Apply one block operation to a schema file

use anyhow::{Context, Result};

use super::{load_schema, render_schema, write_schema};
use crate::cli::args::{BlockAction, SchemaTarget, StyleArgs};
use crate::core::blocks::{self, BlockUpdate};
use crate::core::schema::{BlockStyle, Schema};
use crate::ui::output::{self, Verbosity};

/// Style given on the command line, if any. The title defaults to the
/// block name.
fn explicit_style(block: &str, style: StyleArgs) -> Option<BlockStyle> {
    if style.is_empty() {
        return None;
    }
    Some(BlockStyle::new(
        Some(style.title.unwrap_or_else(|| block.to_string())),
        style.description,
        style.color.unwrap_or_default(),
    ))
}

fn apply(action: BlockAction) -> Result<(SchemaTarget, Schema, String)> {
    Ok(match action {
        BlockAction::Assign {
            target,
            block,
            items,
            style,
        } => {
            let schema = load_schema(&target.schema)?;
            let next = blocks::assign(&schema, &items, &block, explicit_style(&block, style))
                .with_context(|| format!("Failed to assign to block '{}'", block))?;
            let summary = format!("Assigned {} item(s) to '{}'", items.len(), block);
            (target, next, summary)
        }
        BlockAction::Create {
            target,
            name,
            items,
            style,
        } => {
            let schema = load_schema(&target.schema)?;
            let next = blocks::create_block(
                &schema,
                &items,
                &name,
                style.title,
                style.description,
                style.color.unwrap_or_default(),
            )
            .with_context(|| format!("Failed to create block '{}'", name))?;
            let summary = format!("Created block '{}' with {} item(s)", name, items.len());
            (target, next, summary)
        }
        BlockAction::Unassign { target, item } => {
            let schema = load_schema(&target.schema)?;
            let next = blocks::unassign(&schema, &item)?;
            (target, next, format!("Unassigned '{}'", item))
        }
        BlockAction::Move { target, item, to } => {
            let schema = load_schema(&target.schema)?;
            let next = blocks::move_to(&schema, &item, &to)
                .with_context(|| format!("Failed to move '{}'", item))?;
            (target, next, format!("Moved '{}' to '{}'", item, to))
        }
        BlockAction::Dissolve { target, block } => {
            let schema = load_schema(&target.schema)?;
            let next = blocks::dissolve(&schema, &block)?;
            (target, next, format!("Dissolved block '{}'", block))
        }
        BlockAction::Update {
            target,
            block,
            rename,
            style,
        } => {
            let schema = load_schema(&target.schema)?;
            let update = BlockUpdate {
                name: rename,
                title: style.title,
                description: style.description,
                color_theme: style.color,
            };
            let next = blocks::update_block(&schema, &block, update)
                .with_context(|| format!("Failed to update block '{}'", block))?;
            (target, next, format!("Updated block '{}'", block))
        }
    })
}

/// Apply `action`, then print the new schema or write it back.
pub fn block(action: BlockAction, verbosity: Verbosity) -> Result<()> {
    let (target, schema, summary) = apply(action)?;
    if target.write {
        write_schema(&target.schema, &schema)?;
        output::success(summary, verbosity);
    } else {
        output::emit(render_schema(&schema)?);
    }
    Ok(())
}
