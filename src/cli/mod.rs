//! The rbcst Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::{fs, process};

use clap::Parser;

use crate::cli::args::{Command, RbcstArgs};
use crate::events::{normalize_events, read_events};
use crate::logging::init_logger;
use crate::test_harness::{run_all_tests, HarnessConfig};
use crate::CstError;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = RbcstArgs::parse();
    init_logger(args.no_color, args.log_level.as_deref());

    let result = match args.command {
        Command::Print { events } => handle_print(&events),
        Command::Check { events, expected } => handle_check(&events, &expected, args.no_color),
        Command::Test { path, filter } => handle_test(&path, filter, args.no_color),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    }
}

/// Handles the `print` subcommand.
fn handle_print(path: &Path) -> Result<bool, CstError> {
    let normalized = normalize_events(read_events(path)?)?;
    output::print_normalized(&normalized);
    Ok(true)
}

/// Handles the `check` subcommand. Diagnostics are printed but do not fail
/// the comparison.
fn handle_check(events: &Path, expected: &Path, no_color: bool) -> Result<bool, CstError> {
    let normalized = normalize_events(read_events(events)?)?;
    let expected_text = fs::read_to_string(expected).map_err(|source| CstError::Io {
        path: expected.display().to_string(),
        source,
    })?;
    for diagnostic in &normalized.diagnostics {
        println!("{}", diagnostic);
    }
    let differs = output::print_mismatch(&expected_text, &normalized.render(), no_color);
    if !differs {
        println!("ok");
    }
    Ok(!differs)
}

/// Handles the `test` subcommand.
fn handle_test(path: &Path, filter: Option<String>, no_color: bool) -> Result<bool, CstError> {
    let config = HarnessConfig {
        suite_root: path.to_path_buf(),
        use_colors: !no_color && HarnessConfig::default().use_colors,
        filter,
    };
    let summary = run_all_tests(&config)?;
    Ok(summary.failed == 0)
}
