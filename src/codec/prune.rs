//! codec::prune
//!
//! Removal of empty noise lists from exported values.

use serde_json::Value;

/// Keys omitted from exports when their value is an empty list.
pub const PRUNED_WHEN_EMPTY: &[&str] = &[
    "linked_form_fields_text",
    "linked_dates",
    "linkedFields",
    "visibleIf",
];

/// Remove [`PRUNED_WHEN_EMPTY`] keys holding `[]`, at any depth.
///
/// Non-empty lists and other keys are left untouched.
pub fn prune_empty_lists(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|key, v| {
                !(PRUNED_WHEN_EMPTY.contains(&key.as_str())
                    && v.as_array().is_some_and(Vec::is_empty))
            });
            map.values_mut().for_each(prune_empty_lists);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_empty_lists),
        _ => {}
    }
}
