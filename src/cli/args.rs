//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{ColorTheme, InputType, UniqueId};
use crate::ui::output::Verbosity;
use crate::ui::report::CoordsFormat;

/// fb - Form schema blocks, attribute sanitizing, and declaration export
#[derive(Parser, Debug)]
#[command(name = "fb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a schema as a declaration (or its JSON companion)
    #[command(
        name = "export",
        after_help = "\
EXAMPLES:
    # Print the declaration text
    fb export schema.json --form-type purchase-agreement

    # Print the bare JSON literal
    fb export schema.json --form-type purchase-agreement --json

    # Write purchase_agreement_schema.ts and .json into ./out
    fb export schema.json --form-type purchase-agreement --out-dir out"
    )]
    Export {
        /// Schema file (JSON list of items)
        schema: PathBuf,

        /// Form type; names the exported declaration
        #[arg(long)]
        form_type: String,

        /// Print the JSON companion instead of the declaration
        #[arg(long, conflicts_with = "out_dir")]
        json: bool,

        /// Write both files into this directory (default: config export.out_dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Parse an edited declaration back into a schema
    Import {
        /// Declaration file
        file: PathBuf,

        /// Write the schema here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Verify schema invariants; exits non-zero on violations
    Check {
        /// Schema file
        schema: PathBuf,
    },

    /// Show the computed block view
    Blocks {
        /// Schema file
        schema: PathBuf,
    },

    /// Apply a block operation
    Block {
        #[command(subcommand)]
        action: BlockAction,
    },

    /// Sanitize a raw attribute record
    #[command(
        name = "sanitize",
        long_about = "Sanitize a raw attribute record.\n\n\
            Keeps only permitted keys with well-formed values and prints the \
            cleaned record. The pass is written to the audit log like a \
            generated reply. Records that cannot be cleaned fall back to the \
            default attributes."
    )]
    Sanitize {
        /// JSON file holding the raw record (`-` for stdin)
        raw: PathBuf,

        /// Input type of the field the record describes
        #[arg(long)]
        input_type: InputType,

        /// Intent recorded in the audit log
        #[arg(long, default_value = "manual edit")]
        intent: String,

        /// Group type recorded in the audit log
        #[arg(long, default_value = "single")]
        group_type: String,
    },

    /// Generate display attributes with the configured generator
    Generate {
        /// What the field is for
        #[arg(long)]
        intent: String,

        /// Input type of the field
        #[arg(long)]
        field_type: InputType,

        /// Group the field belongs to
        #[arg(long, default_value = "single")]
        group_type: String,

        /// Source field names, repeatable
        #[arg(long = "context", value_name = "NAME")]
        context: Vec<String>,
    },

    /// Report source field coordinates
    Coords {
        /// Schema file
        schema: PathBuf,

        /// Report layout
        #[arg(long, value_enum, default_value_t = CoordsFormat::Simple)]
        format: CoordsFormat,
    },

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective value of a key
    Get {
        /// Dotted key, e.g. generator.model
        key: String,
    },
    /// Set a value in the config file
    Set {
        /// Dotted key, e.g. generator.model
        key: String,
        /// Value to set
        value: String,
    },
    /// List every key with its effective value
    List,
}

/// Schema file a block operation reads, and whether to write back.
#[derive(Args, Debug, Clone)]
pub struct SchemaTarget {
    /// Schema file
    pub schema: PathBuf,

    /// Overwrite the schema file instead of printing the result
    #[arg(long)]
    pub write: bool,
}

/// Optional block style flags.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Block title
    #[arg(long)]
    pub title: Option<String>,

    /// Block description
    #[arg(long)]
    pub description: Option<String>,

    /// Color theme
    #[arg(long)]
    pub color: Option<ColorTheme>,
}

impl StyleArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.color.is_none()
    }
}

/// Block operations.
#[derive(Subcommand, Debug)]
pub enum BlockAction {
    /// Put items into an existing block (or a new one when styled)
    Assign {
        #[command(flatten)]
        target: SchemaTarget,

        /// Block name
        #[arg(long)]
        block: String,

        /// Item ids, repeatable
        #[arg(long = "item", value_name = "ID", required = true)]
        items: Vec<UniqueId>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Create a block from items
    Create {
        #[command(flatten)]
        target: SchemaTarget,

        /// Block name
        #[arg(long)]
        name: String,

        /// Item ids, repeatable
        #[arg(long = "item", value_name = "ID", required = true)]
        items: Vec<UniqueId>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Remove an item from its block
    Unassign {
        #[command(flatten)]
        target: SchemaTarget,

        /// Item id
        #[arg(long)]
        item: UniqueId,
    },

    /// Move an item to a block, or to `unassigned`
    Move {
        #[command(flatten)]
        target: SchemaTarget,

        /// Item id
        #[arg(long)]
        item: UniqueId,

        /// Target block name
        #[arg(long)]
        to: String,
    },

    /// Dissolve a block, leaving its items unassigned
    Dissolve {
        #[command(flatten)]
        target: SchemaTarget,

        /// Block name
        #[arg(long)]
        block: String,
    },

    /// Rename or restyle a block
    Update {
        #[command(flatten)]
        target: SchemaTarget,

        /// Block name
        #[arg(long)]
        block: String,

        /// New block name
        #[arg(long)]
        rename: Option<String>,

        #[command(flatten)]
        style: StyleArgs,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
