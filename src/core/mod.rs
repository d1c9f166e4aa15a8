//! core
//!
//! Core domain types, the schema value, and operations on it.
//!
//! # Modules
//!
//! - [`types`] - Strong types: UniqueId, BlockName, InputType, etc.
//! - [`schema`] - Schema items and the immutable `Schema` value
//! - [`blocks`] - Block grouping operations and the computed block view
//! - [`verify`] - Full verification of schema invariants
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Every mutation returns a new `Schema`; inputs are never modified
//! - All verification is deterministic

pub mod blocks;
pub mod config;
pub mod schema;
pub mod types;
pub mod verify;
