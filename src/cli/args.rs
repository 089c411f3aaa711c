//! Defines the command-line arguments and subcommands for the rbcst CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "rbcst",
    version,
    about = "Normalizes Ripper event streams into tree-sitter-ruby shaped syntax trees."
)]
pub struct RbcstArgs {
    /// Log filter for stderr (e.g. `debug`, `rbcst=trace`). Overrides RBCST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize an event stream and print the tree.
    Print {
        /// JSON or JSON-lines event stream.
        #[arg(required = true)]
        events: PathBuf,
    },
    /// Normalize an event stream and compare it with an expected dump.
    Check {
        /// JSON or JSON-lines event stream.
        #[arg(required = true)]
        events: PathBuf,
        /// Expected tree dump, e.g. from `tree-sitter parse`.
        #[arg(required = true)]
        expected: PathBuf,
    },
    /// Discover and run YAML suites in a directory.
    Test {
        /// The directory containing suite files.
        #[arg(default_value = "tests/suites")]
        path: PathBuf,
        /// Only run cases whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
    },
}
