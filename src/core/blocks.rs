//! core::blocks
//!
//! Block grouping: the computed block view and the block mutation engine.
//!
//! # Blocks are derived
//!
//! A block has no record of its own. It exists while at least one item
//! names it in `display_attributes.block`, and its style is the
//! `block_style` copied onto each member. [`view`] recomputes the grouping
//! from a schema on demand.
//!
//! # Invariants
//!
//! Every operation here returns a fresh [`Schema`] and leaves its input
//! untouched. After every operation all members of a block carry the same
//! `block_style`: the style is resolved once per call and written to every
//! affected member, never computed per item. An item without a block never
//! carries a style.
//!
//! Failed preconditions abort the operation; the caller keeps the schema it
//! passed in.
//!
//! # Example
//!
//! ```
//! use formblocks::core::blocks::{self, BlockUpdate};
//! use formblocks::core::schema::{DisplayAttributes, Schema, SchemaItem};
//! use formblocks::core::types::{ColorTheme, InputType, UniqueId};
//!
//! let ids: Vec<UniqueId> = ["name", "phone"].iter().map(|s| UniqueId::new(*s).unwrap()).collect();
//! let schema = Schema::new(
//!     ids.iter()
//!         .map(|id| SchemaItem::new(id.clone(), DisplayAttributes::new(id.as_str(), InputType::Text)))
//!         .collect(),
//! )
//! .unwrap();
//!
//! let grouped = blocks::create_block(&schema, &ids, "buyer", Some("Buyer".into()), None, ColorTheme::Blue).unwrap();
//! assert_eq!(blocks::view(&grouped).blocks.len(), 1);
//!
//! let renamed = blocks::update_block(&grouped, "buyer", BlockUpdate::rename("purchaser")).unwrap();
//! assert!(blocks::view(&renamed).find("purchaser").is_some());
//!
//! let dissolved = blocks::dissolve(&renamed, "purchaser").unwrap();
//! assert!(blocks::view(&dissolved).blocks.is_empty());
//! ```

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::core::schema::{BlockStyle, Schema};
use crate::core::types::{BlockName, ColorTheme, TypeError, UniqueId};

/// Errors from block operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("block name cannot be blank")]
    EmptyName,

    #[error("no items selected")]
    EmptySelection,

    #[error("block '{0}' has no members yet; a style is required to create it")]
    StyleRequired(BlockName),

    #[error("block name '{0}' is reserved")]
    ReservedBlockName(String),

    #[error("block '{0}' does not exist")]
    UnknownBlock(String),

    #[error("block '{0}' already exists")]
    BlockExists(BlockName),

    #[error("item '{0}' not found")]
    UnknownItem(UniqueId),
}

/// One derived block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub name: BlockName,
    /// Style of the first member
    pub style: Option<BlockStyle>,
    /// Member ids in schema order
    pub members: Vec<UniqueId>,
}

impl Block {
    /// Title to show for the block, falling back to its name.
    pub fn display_title(&self) -> &str {
        self.style
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or(self.name.as_str())
    }

    /// Color theme, gray when the block carries no style.
    pub fn color_theme(&self) -> ColorTheme {
        self.style.as_ref().map(|s| s.color_theme).unwrap_or_default()
    }
}

/// Grouping of a schema into blocks plus the unassigned remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockView {
    /// Blocks in order of first appearance
    pub blocks: Vec<Block>,
    /// Items without a block, in schema order
    pub unassigned: Vec<UniqueId>,
}

impl BlockView {
    /// Find a block by name.
    pub fn find(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name.as_str() == name)
    }
}

/// Compute the block view of a schema.
pub fn view(schema: &Schema) -> BlockView {
    let mut out = BlockView::default();
    for item in schema {
        match item.block() {
            Some(name) => match out.blocks.iter_mut().find(|b| &b.name == name) {
                Some(block) => block.members.push(item.unique_id.clone()),
                None => out.blocks.push(Block {
                    name: name.clone(),
                    style: item.display_attributes.block_style.clone(),
                    members: vec![item.unique_id.clone()],
                }),
            },
            None => out.unassigned.push(item.unique_id.clone()),
        }
    }
    out
}

/// Partial update for [`update_block`].
///
/// Absent fields keep their current value. A blank title is ignored; a blank
/// description clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color_theme: Option<ColorTheme>,
}

impl BlockUpdate {
    /// An update that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn touches_style(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.color_theme.is_some()
    }

    /// The style after this update. A block without a style stays without
    /// one unless the update sets a style field.
    fn apply_to(&self, current: Option<&BlockStyle>) -> Option<BlockStyle> {
        if current.is_none() && !self.touches_style() {
            return None;
        }
        let mut style = current.cloned().unwrap_or_default();
        if let Some(title) = self.title.as_ref().filter(|t| !t.trim().is_empty()) {
            style.title = Some(title.clone());
        }
        if let Some(description) = &self.description {
            style.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(color) = self.color_theme {
            style.color_theme = color;
        }
        Some(style)
    }
}

fn block_name(name: &str) -> Result<BlockName, BlockError> {
    BlockName::new(name).map_err(|e| match e {
        TypeError::ReservedBlockName(n) => BlockError::ReservedBlockName(n),
        _ => BlockError::EmptyName,
    })
}

fn check_selection(schema: &Schema, items: &[UniqueId]) -> Result<HashSet<UniqueId>, BlockError> {
    if items.is_empty() {
        return Err(BlockError::EmptySelection);
    }
    let mut selected = HashSet::with_capacity(items.len());
    for id in items {
        if !schema.contains(id) {
            return Err(BlockError::UnknownItem(id.clone()));
        }
        selected.insert(id.clone());
    }
    Ok(selected)
}

fn current_style(schema: &Schema, name: &BlockName) -> Option<Option<BlockStyle>> {
    schema
        .iter()
        .find(|item| item.block() == Some(name))
        .map(|item| item.display_attributes.block_style.clone())
}

/// Put `items` into `block`.
///
/// With `style`, that style becomes the style of the whole block, existing
/// members included. Without it, the movers take the block's current style.
///
/// # Errors
///
/// - `EmptyName` / `ReservedBlockName` for an invalid block name
/// - `EmptySelection` if `items` is empty
/// - `UnknownItem` if an id is not in the schema
/// - `StyleRequired` if the block has no members and no style is given
pub fn assign(
    schema: &Schema,
    items: &[UniqueId],
    block: &str,
    style: Option<BlockStyle>,
) -> Result<Schema, BlockError> {
    let name = block_name(block)?;
    let selected = check_selection(schema, items)?;

    let resolved = match (style, current_style(schema, &name)) {
        (Some(style), _) => Some(style),
        (None, Some(existing)) => existing,
        (None, None) => return Err(BlockError::StyleRequired(name)),
    };

    Ok(schema.map_display(|id, attrs| {
        if selected.contains(id) || attrs.block.as_ref() == Some(&name) {
            attrs.block = Some(name.clone());
            attrs.block_style = resolved.clone();
        }
    }))
}

/// Create (or restyle) a block from a selection.
///
/// The title defaults to the block name. If the block already exists the new
/// style replaces the style of every member.
///
/// # Errors
///
/// `EmptyName` is checked first, then `EmptySelection`, then the
/// [`assign`] preconditions.
pub fn create_block(
    schema: &Schema,
    items: &[UniqueId],
    block: &str,
    title: Option<String>,
    description: Option<String>,
    color_theme: ColorTheme,
) -> Result<Schema, BlockError> {
    let name = block_name(block)?;
    if items.is_empty() {
        return Err(BlockError::EmptySelection);
    }
    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| name.to_string());
    let style = BlockStyle::new(Some(title), description, color_theme);
    assign(schema, items, name.as_str(), Some(style))
}

/// Remove one item from its block. Other members are untouched.
///
/// Unassigning an item that has no block returns an equal schema.
pub fn unassign(schema: &Schema, item: &UniqueId) -> Result<Schema, BlockError> {
    if !schema.contains(item) {
        return Err(BlockError::UnknownItem(item.clone()));
    }
    Ok(schema.map_display(|id, attrs| {
        if id == item {
            attrs.clear_block();
        }
    }))
}

/// Drag-and-drop form of [`unassign`].
pub fn move_to_unassigned(schema: &Schema, item: &UniqueId) -> Result<Schema, BlockError> {
    unassign(schema, item)
}

/// Move one item to `target`, where `"unassigned"` means no block.
///
/// Any other target must be an existing block; the item takes its style.
pub fn move_to(schema: &Schema, item: &UniqueId, target: &str) -> Result<Schema, BlockError> {
    if target == BlockName::UNASSIGNED {
        return move_to_unassigned(schema, item);
    }
    assign(schema, std::slice::from_ref(item), target, None)
}

/// Unassign every member of `block`; the block ceases to exist.
pub fn dissolve(schema: &Schema, block: &str) -> Result<Schema, BlockError> {
    let name = block_name(block)?;
    if current_style(schema, &name).is_none() {
        return Err(BlockError::UnknownBlock(block.to_string()));
    }
    Ok(schema.map_display(|_, attrs| {
        if attrs.block.as_ref() == Some(&name) {
            attrs.clear_block();
        }
    }))
}

/// Rename and/or restyle a block, applied to all members at once.
///
/// # Errors
///
/// - `UnknownBlock` if `block` has no members
/// - `EmptyName` / `ReservedBlockName` for an invalid new name
/// - `BlockExists` if the new name is another existing block
pub fn update_block(schema: &Schema, block: &str, update: BlockUpdate) -> Result<Schema, BlockError> {
    let name = block_name(block)?;
    let current = current_style(schema, &name)
        .ok_or_else(|| BlockError::UnknownBlock(block.to_string()))?;

    let target = match &update.name {
        Some(new_name) => {
            let new_name = block_name(new_name)?;
            if new_name != name && current_style(schema, &new_name).is_some() {
                return Err(BlockError::BlockExists(new_name));
            }
            new_name
        }
        None => name.clone(),
    };
    let style = update.apply_to(current.as_ref());

    Ok(schema.map_display(|_, attrs| {
        if attrs.block.as_ref() == Some(&name) {
            attrs.block = Some(target.clone());
            attrs.block_style = style.clone();
        }
    }))
}
