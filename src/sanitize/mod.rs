//! sanitize
//!
//! Cleans untrusted attribute records before they reach the schema.
//!
//! # Contract
//!
//! Input is an arbitrary JSON value (typically produced by an external text
//! generator) and the target [`InputType`]. Output is a record holding only
//! keys from [`rules::TOP_LEVEL`] whose values pass their shape check, with
//! `special_input` narrowed to the record permitted for the input type.
//!
//! - `display_name` must be present and non-blank, checked before anything
//!   else. Its absence is the only hard failure.
//! - Null and blank-string values count as not provided and are omitted.
//! - Keys outside the allow-list are dropped with a warning.
//! - System-owned keys ([`rules::SYSTEM_KEYS`]) are always excluded and
//!   reported as [`SanitizeWarning::RestrictedFieldRejected`].
//! - Out-of-range `width`/`order` and wrongly shaped values are dropped with
//!   a warning; no default is substituted.
//! - A `special_input` sub-record for another input type is ignored, never
//!   reinterpreted. A sub-record left empty after filtering is removed, and
//!   so is `special_input` itself when nothing survives.
//!
//! Sanitizing is a pure function of its inputs: cleaning an already-cleaned
//! record returns it unchanged.
//!
//! # Example
//!
//! ```
//! use formblocks::core::types::InputType;
//! use formblocks::sanitize::sanitize;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "display_name": "Phone",
//!     "width": 99,
//!     "extra": "x",
//!     "special_input": { "text": { "phone": true, "bogus": 1 } }
//! });
//! let cleaned = sanitize(&raw, InputType::Text).unwrap();
//! assert_eq!(
//!     serde_json::to_value(&cleaned.attributes).unwrap(),
//!     json!({ "display_name": "Phone", "special_input": { "text": { "phone": true } } })
//! );
//! ```

pub mod rules;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::types::InputType;
use rules::{FieldRule, REQUIRED_KEY, SPECIAL_INPUT_KEY};

/// Hard sanitizing failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("attribute record must be a JSON object")]
    NotARecord,

    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),
}

/// Something the sanitizer removed. Recovered locally, never a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum SanitizeWarning {
    /// A system-owned key was present
    RestrictedFieldRejected { key: String },
    /// A key outside the allow-list was present
    UnknownKey { key: String },
    /// A permitted key had a value of the wrong shape or range
    InvalidFieldValue { key: String, value: Value },
    /// A `special_input` sub-record for a different input type
    SpecialInputMismatch { kind: String, input_type: InputType },
    /// A `special_input` sub-record with nothing permitted left in it
    SpecialInputEmptied { kind: String },
}

impl std::fmt::Display for SanitizeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanitizeWarning::RestrictedFieldRejected { key } => {
                write!(f, "attempted to set restricted property '{}'", key)
            }
            SanitizeWarning::UnknownKey { key } => write!(f, "dropped unknown property '{}'", key),
            SanitizeWarning::InvalidFieldValue { key, value } => {
                write!(f, "dropped invalid value for '{}': {}", key, value)
            }
            SanitizeWarning::SpecialInputMismatch { kind, input_type } => write!(
                f,
                "ignored special_input.{} on a {} field",
                kind, input_type
            ),
            SanitizeWarning::SpecialInputEmptied { kind } => {
                write!(f, "dropped special_input.{} (nothing permitted left)", kind)
            }
        }
    }
}

/// A record that passed sanitizing.
///
/// Only [`sanitize`] and [`CleanedAttributes::fallback`] construct one, so
/// holding a value proves its keys are on the allow-list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanedAttributes(Map<String, Value>);

impl CleanedAttributes {
    /// Degraded record returned when generation fails.
    pub fn fallback() -> Self {
        let mut map = Map::new();
        map.insert(REQUIRED_KEY.into(), Value::from("Field"));
        map.insert("width".into(), Value::from(12));
        Self(map)
    }

    /// The label; always present.
    pub fn display_name(&self) -> &str {
        self.0
            .get(REQUIRED_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Output of a successful pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub attributes: CleanedAttributes,
    pub warnings: Vec<SanitizeWarning>,
}

/// Clean `raw` for a field of `input_type`.
///
/// Every warning is also emitted as a `tracing` warning, inheriting the
/// caller's span (the generation pipeline tags it with the request id).
///
/// # Errors
///
/// - `NotARecord` if `raw` is not a JSON object
/// - `MissingRequiredField` if `display_name` is absent, null, blank or not
///   a string
pub fn sanitize(raw: &Value, input_type: InputType) -> Result<Sanitized, SanitizeError> {
    let record = raw.as_object().ok_or(SanitizeError::NotARecord)?;

    match record.get(REQUIRED_KEY) {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => return Err(SanitizeError::MissingRequiredField(REQUIRED_KEY)),
    }

    let mut warnings = Vec::new();

    for key in record.keys() {
        if rules::is_system_key(key) {
            warnings.push(SanitizeWarning::RestrictedFieldRejected { key: key.clone() });
        } else if rules::top_level_rule(key).is_none() {
            warnings.push(SanitizeWarning::UnknownKey { key: key.clone() });
        }
    }

    let mut cleaned = Map::new();
    for rule in rules::TOP_LEVEL {
        let Some(value) = accept(record, rule, rule.key, &mut warnings) else {
            continue;
        };
        if rule.key == SPECIAL_INPUT_KEY {
            if let Some(special) = clean_special_input(value, input_type, &mut warnings) {
                cleaned.insert(rule.key.into(), special);
            }
        } else {
            cleaned.insert(rule.key.into(), value.clone());
        }
    }

    for warning in &warnings {
        tracing::warn!(%input_type, "{}", warning);
    }

    Ok(Sanitized {
        attributes: CleanedAttributes(cleaned),
        warnings,
    })
}

/// Look up `rule.key` in `record`, returning the value if provided and valid.
fn accept<'a>(
    record: &'a Map<String, Value>,
    rule: &FieldRule,
    path: &str,
    warnings: &mut Vec<SanitizeWarning>,
) -> Option<&'a Value> {
    let value = record.get(rule.key)?;
    if rules::is_absent(value) {
        return None;
    }
    if !(rule.check)(value) {
        warnings.push(SanitizeWarning::InvalidFieldValue {
            key: path.to_string(),
            value: value.clone(),
        });
        return None;
    }
    Some(value)
}

fn clean_special_input(
    value: &Value,
    input_type: InputType,
    warnings: &mut Vec<SanitizeWarning>,
) -> Option<Value> {
    let record = value.as_object()?;
    let rule = rules::special_input_rule(input_type);
    let mut cleaned = Map::new();

    for (kind, sub) in record {
        let Some(rule) = rule.filter(|r| r.kind == kind) else {
            warnings.push(SanitizeWarning::SpecialInputMismatch {
                kind: kind.clone(),
                input_type,
            });
            continue;
        };
        let Some(sub) = sub.as_object() else {
            warnings.push(SanitizeWarning::InvalidFieldValue {
                key: format!("{}.{}", SPECIAL_INPUT_KEY, kind),
                value: sub.clone(),
            });
            continue;
        };

        for key in sub.keys() {
            if !rule.fields.iter().any(|f| f.key == key) {
                warnings.push(SanitizeWarning::UnknownKey {
                    key: format!("{}.{}.{}", SPECIAL_INPUT_KEY, kind, key),
                });
            }
        }

        let mut fields = Map::new();
        for field in rule.fields {
            let path = format!("{}.{}.{}", SPECIAL_INPUT_KEY, kind, field.key);
            if let Some(v) = accept(sub, field, &path, warnings) {
                fields.insert(field.key.into(), v.clone());
            }
        }

        if fields.is_empty() {
            warnings.push(SanitizeWarning::SpecialInputEmptied { kind: kind.clone() });
        } else {
            cleaned.insert(kind.clone(), Value::Object(fields));
        }
    }

    (!cleaned.is_empty()).then_some(Value::Object(cleaned))
}
