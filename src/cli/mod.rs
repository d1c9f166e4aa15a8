//! cli
//!
//! Command-line interface layer for fb.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and schema files
//! - Delegate to the library and format the result
//!
//! Handlers never hold state between invocations; every mutation reads a
//! schema file and prints (or writes) the new one.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`, after logging is set
/// up from the parsed flags.
pub async fn run(cli: Cli) -> Result<()> {
    let verbosity = cli.verbosity();
    commands::dispatch(cli.command, verbosity).await
}
