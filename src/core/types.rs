//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`UniqueId`] - Stable identifier of a schema item
//! - [`BlockName`] - Validated block name (`"unassigned"` is reserved)
//! - [`InputType`] - Fixed enumeration of field input kinds
//! - [`ColorTheme`] - Block color theme
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`Fingerprint`] - Content hash of a schema for change detection
//! - [`ValueTransform`] - Callable attribute transform (never serialized)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a block literally named "unassigned" or an
//! empty item id can never reach the schema.
//!
//! # Examples
//!
//! ```
//! use formblocks::core::types::{BlockName, InputType, UniqueId};
//!
//! let id = UniqueId::new("buyer_name").unwrap();
//! let block = BlockName::new("Buyer Details").unwrap();
//! assert_eq!("text".parse::<InputType>().unwrap(), InputType::Text);
//!
//! assert!(UniqueId::new("").is_err());
//! assert!(BlockName::new("   ").is_err());
//! assert!(BlockName::new("unassigned").is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid unique id: {0}")]
    InvalidUniqueId(String),

    #[error("block name cannot be blank")]
    EmptyBlockName,

    #[error("block name '{0}' is reserved")]
    ReservedBlockName(String),

    #[error("unknown input type '{0}'")]
    UnknownInputType(String),

    #[error("unknown color theme '{0}'")]
    UnknownColorTheme(String),
}

/// Stable identifier of a schema item.
///
/// Ids are assigned by the extraction process and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueId(String);

impl UniqueId {
    /// Create a new validated id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidUniqueId` if the id is empty or contains
    /// control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidUniqueId("id cannot be empty".into()));
        }
        if id.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidUniqueId(
                "id cannot contain control characters".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UniqueId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl FromStr for UniqueId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<UniqueId> for String {
    fn from(id: UniqueId) -> Self {
        id.0
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated block name.
///
/// Block names must contain at least one non-whitespace character and may
/// not equal [`BlockName::UNASSIGNED`], the sentinel used by interactive
/// re-grouping to mean "no block".
///
/// # Example
///
/// ```
/// use formblocks::core::types::{BlockName, TypeError};
///
/// let name = BlockName::new("Property").unwrap();
/// assert_eq!(name.as_str(), "Property");
///
/// assert_eq!(BlockName::new(""), Err(TypeError::EmptyBlockName));
/// assert!(matches!(
///     BlockName::new("unassigned"),
///     Err(TypeError::ReservedBlockName(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockName(String);

impl BlockName {
    /// Sentinel target meaning "move out of any block".
    pub const UNASSIGNED: &'static str = "unassigned";

    /// Create a new validated block name.
    ///
    /// # Errors
    ///
    /// - `TypeError::EmptyBlockName` if the name is blank
    /// - `TypeError::ReservedBlockName` if the name is the unassigned sentinel
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TypeError::EmptyBlockName);
        }
        if name == Self::UNASSIGNED {
            return Err(TypeError::ReservedBlockName(name));
        }
        Ok(Self(name))
    }

    /// Get the block name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BlockName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BlockName> for String {
    fn from(name: BlockName) -> Self {
        name.0
    }
}

impl AsRef<str> for BlockName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input kind of a form field.
///
/// Set once when the extraction process creates the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Checkbox,
    Radio,
    Dropdown,
    Signature,
    Button,
}

impl InputType {
    /// Every input type, in declaration order.
    pub const ALL: [InputType; 6] = [
        InputType::Text,
        InputType::Checkbox,
        InputType::Radio,
        InputType::Dropdown,
        InputType::Signature,
        InputType::Button,
    ];

    /// The wire name of this input type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Checkbox => "checkbox",
            InputType::Radio => "radio",
            InputType::Dropdown => "dropdown",
            InputType::Signature => "signature",
            InputType::Button => "button",
        }
    }
}

impl FromStr for InputType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownInputType(s.to_string()))
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    Blue,
    Green,
    Purple,
    Orange,
    #[default]
    Gray,
}

impl ColorTheme {
    /// The wire name of this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Blue => "blue",
            ColorTheme::Green => "green",
            ColorTheme::Purple => "purple",
            ColorTheme::Orange => "orange",
            ColorTheme::Gray => "gray",
        }
    }
}

impl FromStr for ColorTheme {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(ColorTheme::Blue),
            "green" => Ok(ColorTheme::Green),
            "purple" => Ok(ColorTheme::Purple),
            "orange" => Ok(ColorTheme::Orange),
            "gray" => Ok(ColorTheme::Gray),
            other => Err(TypeError::UnknownColorTheme(other.to_string())),
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use formblocks::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A stable hash over a schema's canonical JSON.
///
/// Two schema values with the same fingerprint serialize identically, which
/// is what the editing UI needs to decide whether anything changed.
///
/// # Example
///
/// ```
/// use formblocks::core::types::Fingerprint;
///
/// let fp = Fingerprint::compute(b"[]");
/// assert_eq!(fp, Fingerprint::compute(b"[]"));
/// assert_ne!(fp, Fingerprint::compute(b"[{}]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint over raw bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A callable attribute transform attached to a field at runtime.
///
/// Transforms cannot be expressed as text, so every serializer skips them.
/// Equality is identity: two transforms are equal only if they share the
/// same allocation.
#[derive(Clone)]
pub struct ValueTransform(Arc<dyn Fn(&serde_json::Value) -> serde_json::Value + Send + Sync>);

impl ValueTransform {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Apply the transform.
    pub fn apply(&self, value: &serde_json::Value) -> serde_json::Value {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueTransform(<fn>)")
    }
}

impl PartialEq for ValueTransform {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod unique_id {
        use super::*;

        #[test]
        fn valid_ids() {
            assert!(UniqueId::new("buyer_name").is_ok());
            assert!(UniqueId::new("Text Field 12").is_ok());
            assert!(UniqueId::new("a.b[0]").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(UniqueId::new("").is_err());
        }

        #[test]
        fn control_chars_rejected() {
            assert!(UniqueId::new("bad\nid").is_err());
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<UniqueId, _> = serde_json::from_str(r#""""#);
            assert!(result.is_err());
        }
    }

    mod block_name {
        use super::*;

        #[test]
        fn keeps_name_verbatim() {
            let name = BlockName::new(" Seller ").unwrap();
            assert_eq!(name.as_str(), " Seller ");
        }

        #[test]
        fn blank_rejected() {
            assert_eq!(BlockName::new(""), Err(TypeError::EmptyBlockName));
            assert_eq!(BlockName::new(" \t"), Err(TypeError::EmptyBlockName));
        }

        #[test]
        fn sentinel_reserved() {
            assert_eq!(
                BlockName::new("unassigned"),
                Err(TypeError::ReservedBlockName("unassigned".into()))
            );
        }

        #[test]
        fn sentinel_case_sensitive() {
            assert!(BlockName::new("Unassigned").is_ok());
        }
    }

    mod input_type {
        use super::*;

        #[test]
        fn parse_roundtrip() {
            for t in InputType::ALL {
                assert_eq!(t.as_str().parse::<InputType>().unwrap(), t);
            }
        }

        #[test]
        fn unknown_rejected() {
            assert_eq!(
                "slider".parse::<InputType>(),
                Err(TypeError::UnknownInputType("slider".into()))
            );
        }

        #[test]
        fn serde_matches_as_str() {
            let json = serde_json::to_string(&InputType::Checkbox).unwrap();
            assert_eq!(json, r#""checkbox""#);
        }
    }

    mod color_theme {
        use super::*;

        #[test]
        fn default_is_gray() {
            assert_eq!(ColorTheme::default(), ColorTheme::Gray);
        }

        #[test]
        fn parse() {
            assert_eq!("purple".parse::<ColorTheme>().unwrap(), ColorTheme::Purple);
            assert!("teal".parse::<ColorTheme>().is_err());
        }
    }

    mod fingerprint {
        use super::*;

        #[test]
        fn deterministic() {
            assert_eq!(Fingerprint::compute(b"abc"), Fingerprint::compute(b"abc"));
        }

        #[test]
        fn hex_sha256() {
            let fp = Fingerprint::compute(b"");
            assert_eq!(
                fp.as_str(),
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
            );
        }
    }

    mod value_transform {
        use super::*;

        #[test]
        fn applies_closure() {
            let t = ValueTransform::new(|v| serde_json::json!([v.clone()]));
            assert_eq!(t.apply(&serde_json::json!(1)), serde_json::json!([1]));
        }

        #[test]
        fn equality_is_identity() {
            let a = ValueTransform::new(|v| v.clone());
            let b = ValueTransform::new(|v| v.clone());
            assert_eq!(a, a.clone());
            assert_ne!(a, b);
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            let ts = UtcTimestamp::now();
            let json = serde_json::to_string(&ts).unwrap();
            let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, parsed);
        }
    }
}
