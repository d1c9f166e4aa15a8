//! formblocks - Form schema blocks, attribute sanitizing, and declaration export
//!
//! A form schema is an ordered list of items, each carrying display
//! attributes (how the field is shown and grouped) and provenance records
//! (which source document fields it came from). This crate models that
//! schema and the operations an editor performs on it.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, the schema value, block operations, verification, config
//! - [`sanitize`] - Allow-list cleaning of proposed display attributes
//! - [`codec`] - Declaration export and lenient re-import
//! - [`generator`] - Attribute generation pipeline around the sanitizer
//! - [`audit`] - Audit records and sinks
//! - [`cli`] - Command-line interface (`fb`)
//! - [`logging`] - Tracing subscriber setup
//! - [`ui`] - Output helpers and text reports
//!
//! # Correctness Invariants
//!
//! 1. Item ids are unique within a schema and never reassigned
//! 2. Every member of a block carries the same block style
//! 3. Operations return a new schema; a failed operation changes nothing
//! 4. Sanitized records contain only permitted keys with well-formed values

pub mod audit;
pub mod cli;
pub mod codec;
pub mod core;
pub mod generator;
pub mod logging;
pub mod sanitize;
pub mod ui;
