//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity and message helpers
//! - [`report`] - Text reports: block view, verification, coordinates
//!
//! # Design
//!
//! All terminal output goes through this module so quiet mode is honoured
//! in one place.

pub mod output;
pub mod report;
