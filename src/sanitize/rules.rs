//! sanitize::rules
//!
//! Allow-list tables for attribute sanitizing.
//!
//! Every permitted key is a [`FieldRule`]: a name, a shape check, and a hint
//! used when describing the allow-list to the generator. Adding an input
//! type with its own `special_input` record is a new [`SpecialInputRule`]
//! entry, not new control flow.

use serde_json::Value;

use crate::core::types::InputType;

/// Shape check for one attribute value.
pub type Check = fn(&Value) -> bool;

/// One permitted key.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub check: Check,
    /// Human description of the accepted shape
    pub hint: &'static str,
}

/// Permitted `special_input` record for one input type.
#[derive(Debug, Clone, Copy)]
pub struct SpecialInputRule {
    pub input_type: InputType,
    /// Key of the nested record, e.g. `"text"` in `special_input.text`
    pub kind: &'static str,
    pub fields: &'static [FieldRule],
}

/// Key that must be present and non-blank.
pub const REQUIRED_KEY: &str = "display_name";

/// Key whose value is checked against [`SPECIAL_INPUT`].
pub const SPECIAL_INPUT_KEY: &str = "special_input";

/// Keys owned by the system; never accepted from a generator.
pub const SYSTEM_KEYS: &[&str] = &["unique_id", "input_type", "value", "pdf_attributes"];

/// Top-level allow-list, in output order.
pub const TOP_LEVEL: &[FieldRule] = &[
    FieldRule {
        key: "display_name",
        check: is_string,
        hint: "string (required)",
    },
    FieldRule {
        key: "description",
        check: is_string,
        hint: "string",
    },
    FieldRule {
        key: "width",
        check: is_grid_width,
        hint: "number 1-12 (grid units)",
    },
    FieldRule {
        key: "placeholder",
        check: is_string,
        hint: "string",
    },
    FieldRule {
        key: "special_input",
        check: Value::is_object,
        hint: "object, see below",
    },
    FieldRule {
        key: "isRequired",
        check: Value::is_boolean,
        hint: "boolean",
    },
    FieldRule {
        key: "validation",
        check: is_present,
        hint: "any JSON value",
    },
    FieldRule {
        key: "order",
        check: is_non_negative,
        hint: "number >= 0",
    },
];

const TEXT_FIELDS: &[FieldRule] = &[
    flag("percentage"),
    flag("phone"),
    flag("date"),
    flag("numbered_date"),
    flag("month_year"),
    flag("currency"),
    flag("number"),
    flag("email"),
    flag("url"),
];

const CHECKBOX_FIELDS: &[FieldRule] = &[
    flag("asRadio"),
    FieldRule {
        key: "horizontal",
        check: is_positive_count,
        hint: "integer >= 1 (columns)",
    },
];

const RADIO_FIELDS: &[FieldRule] = &[
    FieldRule {
        key: "layout",
        check: is_radio_layout,
        hint: "\"vertical\" | \"horizontal\" | \"grid\"",
    },
    FieldRule {
        key: "columns",
        check: is_positive_count,
        hint: "integer >= 1 (grid columns)",
    },
];

/// Per-input-type `special_input` allow-lists.
pub const SPECIAL_INPUT: &[SpecialInputRule] = &[
    SpecialInputRule {
        input_type: InputType::Text,
        kind: "text",
        fields: TEXT_FIELDS,
    },
    SpecialInputRule {
        input_type: InputType::Checkbox,
        kind: "checkbox",
        fields: CHECKBOX_FIELDS,
    },
    SpecialInputRule {
        input_type: InputType::Radio,
        kind: "radio",
        fields: RADIO_FIELDS,
    },
];

const fn flag(key: &'static str) -> FieldRule {
    FieldRule {
        key,
        check: Value::is_boolean,
        hint: "boolean",
    }
}

/// The top-level rule for `key`, if the key is permitted.
pub fn top_level_rule(key: &str) -> Option<&'static FieldRule> {
    TOP_LEVEL.iter().find(|r| r.key == key)
}

/// The `special_input` rule for an input type, if it has one.
pub fn special_input_rule(input_type: InputType) -> Option<&'static SpecialInputRule> {
    SPECIAL_INPUT.iter().find(|r| r.input_type == input_type)
}

/// Whether `key` is system-owned.
pub fn is_system_key(key: &str) -> bool {
    SYSTEM_KEYS.contains(&key)
}

/// Null and blank strings count as "not provided".
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_present(value: &Value) -> bool {
    !value.is_null()
}

fn is_string(value: &Value) -> bool {
    value.is_string()
}

fn is_grid_width(value: &Value) -> bool {
    value.as_f64().is_some_and(|w| (1.0..=12.0).contains(&w))
}

fn is_non_negative(value: &Value) -> bool {
    value.as_f64().is_some_and(|o| o >= 0.0)
}

fn is_positive_count(value: &Value) -> bool {
    value
        .as_u64()
        .is_some_and(|n| n >= 1 && n <= u64::from(u32::MAX))
}

fn is_radio_layout(value: &Value) -> bool {
    matches!(value.as_str(), Some("vertical" | "horizontal" | "grid"))
}
