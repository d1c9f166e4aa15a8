//! core::schema
//!
//! The form schema model.
//!
//! # Shape
//!
//! A [`Schema`] is an ordered sequence of [`SchemaItem`]s. Order is
//! meaningful: it is the export and render order. Each item carries:
//! - `unique_id`: assigned by the extraction process, never reassigned
//! - `display_attributes`: label, input type, grouping and presentation metadata
//! - `pdf_attributes`: provenance owned by the extraction process
//!
//! Unknown keys at each level are kept in a flattened `extra` map so that
//! hand-edited additions survive an export/import cycle in source order.
//!
//! # Replace-on-mutate
//!
//! A `Schema` is never edited in place. Every mutation takes `&self` and
//! returns a fresh value, so callers can keep the previous value for undo
//! and compare values (or [`Schema::fingerprint`]s) to detect changes.
//!
//! This module enforces only id uniqueness. Grouping invariants are
//! maintained by [`crate::core::blocks`].
//!
//! # Example
//!
//! ```
//! use formblocks::core::schema::{DisplayAttributes, Schema, SchemaItem};
//! use formblocks::core::types::{InputType, UniqueId};
//!
//! let item = SchemaItem::new(
//!     UniqueId::new("buyer_name").unwrap(),
//!     DisplayAttributes::new("Buyer name", InputType::Text),
//! );
//! let schema = Schema::new(vec![item.clone()]).unwrap();
//!
//! let mut renamed = item.clone();
//! renamed.display_attributes.display_name = "What is the buyer's full name?".into();
//! let next = schema.replace(&item.unique_id, renamed).unwrap();
//!
//! assert_eq!(schema.get(&item.unique_id).unwrap().display_attributes.display_name, "Buyer name");
//! assert_ne!(schema, next);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::core::types::{
    BlockName, ColorTheme, Fingerprint, InputType, UniqueId, ValueTransform,
};

/// Errors from schema model operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate unique_id '{0}'")]
    DuplicateId(UniqueId),

    #[error("item '{0}' not found")]
    NotFound(UniqueId),

    #[error("unique_id cannot be reassigned (expected '{expected}', found '{found}')")]
    IdChanged { expected: UniqueId, found: UniqueId },

    #[error("input_type of '{id}' cannot change from {from} to {to}")]
    InputTypeChanged {
        id: UniqueId,
        from: InputType,
        to: InputType,
    },

    #[error("attributes for '{id}' do not fit the model: {source}")]
    InvalidAttributes {
        id: UniqueId,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize schema: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// One field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaItem {
    /// Stable identifier
    pub unique_id: UniqueId,

    /// Display metadata
    pub display_attributes: DisplayAttributes,

    /// Provenance from the source document (read-only here)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pdf_attributes: Vec<PdfAttributes>,

    /// Keys this model does not know about, in source order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaItem {
    /// Create an item with no provenance.
    pub fn new(unique_id: UniqueId, display_attributes: DisplayAttributes) -> Self {
        Self {
            unique_id,
            display_attributes,
            pdf_attributes: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Attach provenance records.
    pub fn with_pdf_attributes(mut self, pdf_attributes: Vec<PdfAttributes>) -> Self {
        self.pdf_attributes = pdf_attributes;
        self
    }

    /// Name of the block this item belongs to, if any.
    pub fn block(&self) -> Option<&BlockName> {
        self.display_attributes.block.as_ref()
    }

    /// Whether any provenance record carries a callable transform.
    pub fn has_callables(&self) -> bool {
        self.pdf_attributes
            .iter()
            .any(|p| p.operation.is_some() || p.reverse_operation.is_some())
    }
}

/// Display metadata of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    /// Human-readable label
    pub display_name: String,

    /// Input kind; immutable once created
    pub input_type: InputType,

    /// Owning block, absent when unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockName>,

    /// Denormalized copy of the owning block's style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_style: Option<BlockStyle>,

    /// Grid width, 1-12
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_input: Option<SpecialInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_options: Option<CheckboxOptions>,

    #[serde(
        rename = "isRequired",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Number>,

    /// Ids of fields whose values follow this one
    #[serde(rename = "linkedFields", default)]
    pub linked_fields: Vec<String>,

    /// Visibility conditions
    #[serde(rename = "visibleIf", default)]
    pub visible_if: Vec<Value>,

    /// Keys this model does not know about, in source order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DisplayAttributes {
    /// Create attributes with only the required fields set.
    pub fn new(display_name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            display_name: display_name.into(),
            input_type,
            block: None,
            block_style: None,
            width: None,
            placeholder: None,
            description: None,
            special_input: None,
            checkbox_options: None,
            is_required: None,
            validation: None,
            order: None,
            linked_fields: Vec::new(),
            visible_if: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Overlay a record of attribute values onto these attributes.
    ///
    /// Keys present in `record` overwrite; keys absent keep their value.
    /// `input_type` is never taken from the record.
    pub fn merge(&self, record: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut current = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in record {
            if key == "input_type" {
                continue;
            }
            current.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(current))
    }

    /// Remove block membership and its style copy.
    pub fn clear_block(&mut self) {
        self.block = None;
        self.block_style = None;
    }
}

/// Display metadata of a block, copied onto every member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub color_theme: ColorTheme,
}

impl BlockStyle {
    /// Create a style; blank title or description count as absent.
    pub fn new(title: Option<String>, description: Option<String>, color_theme: ColorTheme) -> Self {
        Self {
            title: title.filter(|t| !t.trim().is_empty()),
            description: description.filter(|d| !d.trim().is_empty()),
            color_theme,
        }
    }
}

/// Input-type specific presentation hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<CheckboxLayout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio: Option<RadioLayout>,
}

/// Formatting flags for text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbered_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_year: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<bool>,
}

/// Layout hints for checkbox groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxLayout {
    /// Single selection only
    #[serde(rename = "asRadio", default, skip_serializing_if = "Option::is_none")]
    pub as_radio: Option<bool>,

    /// Number of columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<u32>,
}

/// Layout hints for radio groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<RadioLayoutKind>,

    /// Columns for grid layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

/// Arrangement of radio options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioLayoutKind {
    Vertical,
    Horizontal,
    Grid,
}

/// Friendlier labels for the members of a checkbox group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxOptions {
    pub options: Vec<CheckboxOption>,
}

/// One checkbox label mapped to its source field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxOption {
    pub display_name: String,
    /// Source field name, matched exactly
    pub value: String,
}

/// Provenance of a field in the source document.
///
/// Owned by the extraction process. The optional transforms are attached at
/// runtime and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfAttributes {
    /// Raw source field name
    pub pdf_field: String,

    #[serde(rename = "formType", default, skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,

    /// Source field kind as reported by the extractor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// `[x1, y1, x2, y2]` in document units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<[f64; 4]>,

    #[serde(default)]
    pub linked_form_fields_text: Vec<String>,

    #[serde(default)]
    pub linked_dates: Vec<Value>,

    #[serde(skip)]
    pub operation: Option<ValueTransform>,

    #[serde(skip)]
    pub reverse_operation: Option<ValueTransform>,

    /// Keys this model does not know about, in source order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PdfAttributes {
    /// Create a provenance record for a source field.
    pub fn new(pdf_field: impl Into<String>) -> Self {
        Self {
            pdf_field: pdf_field.into(),
            form_type: None,
            field_type: None,
            page: None,
            rect: None,
            linked_form_fields_text: Vec::new(),
            linked_dates: Vec::new(),
            operation: None,
            reverse_operation: None,
            extra: Map::new(),
        }
    }

    /// Rounded position and size derived from `rect`.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let [x1, y1, x2, y2] = self.rect?;
        Some(Coordinates {
            x: x1.round() as i64,
            y: y1.round() as i64,
            width: (x2 - x1).round() as i64,
            height: (y2 - y1).round() as i64,
        })
    }
}

/// Rounded field geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// An ordered, immutable sequence of schema items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SchemaItem>", into = "Vec<SchemaItem>")]
pub struct Schema {
    items: Vec<SchemaItem>,
}

impl Schema {
    /// Build a schema, rejecting duplicate ids.
    pub fn new(items: Vec<SchemaItem>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.unique_id) {
                return Err(SchemaError::DuplicateId(item.unique_id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// All items in order.
    pub fn all(&self) -> &[SchemaItem] {
        &self.items
    }

    /// Iterate items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemaItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this id exists.
    pub fn contains(&self, id: &UniqueId) -> bool {
        self.items.iter().any(|item| &item.unique_id == id)
    }

    /// Look up an item by id.
    pub fn get(&self, id: &UniqueId) -> Result<&SchemaItem, SchemaError> {
        self.items
            .iter()
            .find(|item| &item.unique_id == id)
            .ok_or_else(|| SchemaError::NotFound(id.clone()))
    }

    /// Return a new schema with the item `id` replaced by `new_item`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no item has `id`
    /// - `IdChanged` if `new_item` carries a different id
    /// - `InputTypeChanged` if `new_item` changes the input type
    pub fn replace(&self, id: &UniqueId, new_item: SchemaItem) -> Result<Schema, SchemaError> {
        let current = self.get(id)?;
        if &new_item.unique_id != id {
            return Err(SchemaError::IdChanged {
                expected: id.clone(),
                found: new_item.unique_id,
            });
        }
        let from = current.display_attributes.input_type;
        let to = new_item.display_attributes.input_type;
        if from != to {
            return Err(SchemaError::InputTypeChanged {
                id: id.clone(),
                from,
                to,
            });
        }

        let mut replacement = Some(new_item);
        let items = self
            .items
            .iter()
            .map(|item| {
                if &item.unique_id == id {
                    replacement.take().unwrap_or_else(|| item.clone())
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Schema { items })
    }

    /// Merge a cleaned attribute record into one item's display attributes.
    pub fn apply_attributes(
        &self,
        id: &UniqueId,
        record: &Map<String, Value>,
    ) -> Result<Schema, SchemaError> {
        let current = self.get(id)?;
        let display_attributes = current.display_attributes.merge(record).map_err(|source| {
            SchemaError::InvalidAttributes {
                id: id.clone(),
                source,
            }
        })?;
        let updated = SchemaItem {
            display_attributes,
            ..current.clone()
        };
        self.replace(id, updated)
    }

    /// Return a new schema with `f` applied to every item's display attributes.
    ///
    /// Ids and order are untouched, so uniqueness still holds.
    pub(crate) fn map_display<F>(&self, mut f: F) -> Schema
    where
        F: FnMut(&UniqueId, &mut DisplayAttributes),
    {
        let items = self
            .items
            .iter()
            .map(|item| {
                let mut next = item.clone();
                f(&next.unique_id, &mut next.display_attributes);
                debug_assert_eq!(
                    next.display_attributes.input_type,
                    item.display_attributes.input_type
                );
                next
            })
            .collect();
        Schema { items }
    }

    /// Ids of items whose callables an export would drop.
    pub fn lossy_items(&self) -> Vec<UniqueId> {
        self.items
            .iter()
            .filter(|item| item.has_callables())
            .map(|item| item.unique_id.clone())
            .collect()
    }

    /// SHA-256 over the compact JSON form.
    pub fn fingerprint(&self) -> Result<Fingerprint, SchemaError> {
        let bytes = serde_json::to_vec(&self.items).map_err(SchemaError::Serialize)?;
        Ok(Fingerprint::compute(&bytes))
    }

    /// Consume the schema, returning its items.
    pub fn into_items(self) -> Vec<SchemaItem> {
        self.items
    }
}

impl TryFrom<Vec<SchemaItem>> for Schema {
    type Error = SchemaError;

    fn try_from(items: Vec<SchemaItem>) -> Result<Self, Self::Error> {
        Schema::new(items)
    }
}

impl From<Schema> for Vec<SchemaItem> {
    fn from(schema: Schema) -> Self {
        schema.items
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaItem;
    type IntoIter = std::slice::Iter<'a, SchemaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> UniqueId {
        UniqueId::new(s).unwrap()
    }

    fn item(s: &str, input_type: InputType) -> SchemaItem {
        SchemaItem::new(id(s), DisplayAttributes::new(s, input_type))
    }

    fn sample() -> Schema {
        Schema::new(vec![
            item("a", InputType::Text),
            item("b", InputType::Checkbox),
            item("c", InputType::Radio),
        ])
        .unwrap()
    }

    mod new {
        use super::*;

        #[test]
        fn duplicate_ids_rejected() {
            let result = Schema::new(vec![item("a", InputType::Text), item("a", InputType::Radio)]);
            assert!(matches!(result, Err(SchemaError::DuplicateId(dup)) if dup.as_str() == "a"));
        }

        #[test]
        fn preserves_order() {
            let schema = sample();
            let ids: Vec<_> = schema.iter().map(|i| i.unique_id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
        }

        #[test]
        fn deserialize_checks_duplicates() {
            let json = r#"[
                {"unique_id": "x", "display_attributes": {"display_name": "X", "input_type": "text"}},
                {"unique_id": "x", "display_attributes": {"display_name": "Y", "input_type": "text"}}
            ]"#;
            assert!(serde_json::from_str::<Schema>(json).is_err());
        }
    }

    mod get {
        use super::*;

        #[test]
        fn found() {
            assert_eq!(sample().get(&id("b")).unwrap().unique_id.as_str(), "b");
        }

        #[test]
        fn not_found() {
            assert!(matches!(sample().get(&id("zz")), Err(SchemaError::NotFound(_))));
        }
    }

    mod replace {
        use super::*;

        #[test]
        fn returns_new_value_and_leaves_original() {
            let schema = sample();
            let mut b = schema.get(&id("b")).unwrap().clone();
            b.display_attributes.display_name = "Bee".into();

            let next = schema.replace(&id("b"), b).unwrap();

            assert_eq!(schema.get(&id("b")).unwrap().display_attributes.display_name, "b");
            assert_eq!(next.get(&id("b")).unwrap().display_attributes.display_name, "Bee");
            assert_eq!(next.len(), 3);
            assert_eq!(next.all()[1].unique_id.as_str(), "b");
        }

        #[test]
        fn id_change_rejected() {
            let schema = sample();
            let result = schema.replace(&id("a"), item("z", InputType::Text));
            assert!(matches!(result, Err(SchemaError::IdChanged { .. })));
        }

        #[test]
        fn input_type_change_rejected() {
            let schema = sample();
            let result = schema.replace(&id("a"), item("a", InputType::Checkbox));
            assert!(matches!(result, Err(SchemaError::InputTypeChanged { .. })));
        }

        #[test]
        fn unknown_id_rejected() {
            let schema = sample();
            let result = schema.replace(&id("q"), item("q", InputType::Text));
            assert!(matches!(result, Err(SchemaError::NotFound(_))));
        }
    }

    mod apply_attributes {
        use super::*;

        #[test]
        fn overlays_present_keys_only() {
            let schema = sample();
            let mut record = Map::new();
            record.insert("display_name".into(), json!("Buyer phone"));
            record.insert("width".into(), json!(6));
            record.insert(
                "special_input".into(),
                json!({"text": {"phone": true}}),
            );

            let next = schema.apply_attributes(&id("a"), &record).unwrap();
            let attrs = &next.get(&id("a")).unwrap().display_attributes;

            assert_eq!(attrs.display_name, "Buyer phone");
            assert_eq!(attrs.width, Some(Number::from(6)));
            assert_eq!(
                attrs.special_input.as_ref().and_then(|s| s.text.as_ref()).and_then(|t| t.phone),
                Some(true)
            );
            assert_eq!(attrs.input_type, InputType::Text);
        }

        #[test]
        fn ignores_input_type() {
            let schema = sample();
            let mut record = Map::new();
            record.insert("input_type".into(), json!("radio"));

            let next = schema.apply_attributes(&id("a"), &record).unwrap();
            assert_eq!(
                next.get(&id("a")).unwrap().display_attributes.input_type,
                InputType::Text
            );
        }

        #[test]
        fn shape_mismatch_reported() {
            let schema = sample();
            let mut record = Map::new();
            record.insert("placeholder".into(), json!(12));

            let result = schema.apply_attributes(&id("a"), &record);
            assert!(matches!(result, Err(SchemaError::InvalidAttributes { .. })));
        }
    }

    mod serde_shape {
        use super::*;

        #[test]
        fn unknown_keys_survive_in_order() {
            let json = r#"{
                "unique_id": "x",
                "display_attributes": {
                    "display_name": "X",
                    "input_type": "text",
                    "zeta": 1,
                    "alpha": 2
                },
                "custom": true
            }"#;
            let parsed: SchemaItem = serde_json::from_str(json).unwrap();
            let keys: Vec<_> = parsed.display_attributes.extra.keys().cloned().collect();
            assert_eq!(keys, vec!["zeta", "alpha"]);
            assert_eq!(parsed.extra.get("custom"), Some(&json!(true)));

            let back = serde_json::to_value(&parsed).unwrap();
            assert_eq!(back["display_attributes"]["zeta"], json!(1));
            assert_eq!(back["custom"], json!(true));
        }

        #[test]
        fn reserved_block_name_rejected() {
            let json = r#"{
                "unique_id": "x",
                "display_attributes": {
                    "display_name": "X",
                    "input_type": "text",
                    "block": "unassigned"
                }
            }"#;
            assert!(serde_json::from_str::<SchemaItem>(json).is_err());
        }

        #[test]
        fn callables_never_serialize() {
            let mut pdf = PdfAttributes::new("Buyer1");
            pdf.operation = Some(ValueTransform::new(|v| v.clone()));
            let it = item("a", InputType::Text).with_pdf_attributes(vec![pdf]);

            let value = serde_json::to_value(&it).unwrap();
            assert!(value["pdf_attributes"][0].get("operation").is_none());
            assert!(it.has_callables());
        }
    }

    mod lossy_and_fingerprint {
        use super::*;

        #[test]
        fn lossy_items_lists_callable_carriers() {
            let mut pdf = PdfAttributes::new("f");
            pdf.reverse_operation = Some(ValueTransform::new(|v| v.clone()));
            let schema = Schema::new(vec![
                item("a", InputType::Text),
                item("b", InputType::Text).with_pdf_attributes(vec![pdf]),
            ])
            .unwrap();

            assert_eq!(schema.lossy_items(), vec![id("b")]);
        }

        #[test]
        fn fingerprint_tracks_content() {
            let schema = sample();
            let mut a = schema.get(&id("a")).unwrap().clone();
            a.display_attributes.placeholder = Some("e.g. Jane".into());
            let next = schema.replace(&id("a"), a).unwrap();

            assert_eq!(schema.fingerprint().unwrap(), sample().fingerprint().unwrap());
            assert_ne!(schema.fingerprint().unwrap(), next.fingerprint().unwrap());
        }
    }

    mod coordinates {
        use super::*;

        #[test]
        fn rounds_rect() {
            let mut pdf = PdfAttributes::new("f");
            pdf.rect = Some([10.4, 20.6, 110.5, 40.2]);
            assert_eq!(
                pdf.coordinates(),
                Some(Coordinates {
                    x: 10,
                    y: 21,
                    width: 100,
                    height: 20
                })
            );
        }

        #[test]
        fn absent_rect() {
            assert_eq!(PdfAttributes::new("f").coordinates(), None);
        }
    }
}
