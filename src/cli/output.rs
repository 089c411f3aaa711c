//! Handles all user-facing output for the CLI.
//!
//! Trees and diagnostics go to stdout. Diffs are colored with termcolor when
//! the stream is a terminal and colors are not disabled.

use std::io::Write;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::normalize::Normalized;

pub fn color_choice(no_color: bool) -> ColorChoice {
    if no_color || !atty::is(atty::Stream::Stdout) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Prints diagnostics, then the tree.
pub fn print_normalized(normalized: &Normalized) {
    print!("{}", normalized.report());
}

/// Prints a line diff of `expected` against `actual`. Returns true when they
/// differ.
pub fn print_mismatch(expected: &str, actual: &str, no_color: bool) -> bool {
    let changeset = Changeset::new(expected.trim_end(), actual.trim_end(), "\n");
    if changeset.distance == 0 {
        return false;
    }
    let mut stdout = StandardStream::stdout(color_choice(no_color));
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "--- expected");
    let _ = writeln!(stdout, "+++ actual");
    let _ = stdout.reset();
    print_diff(&mut stdout, &changeset.diffs);
    true
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_diff(stdout: &mut StandardStream, diffs: &[Difference]) {
    for diff in diffs {
        let (marker, color, text) = match diff {
            Difference::Same(x) => (' ', None, x),
            Difference::Add(x) => ('+', Some(Color::Green), x),
            Difference::Rem(x) => ('-', Some(Color::Red), x),
        };
        let _ = stdout.set_color(ColorSpec::new().set_fg(color));
        for line in text.lines() {
            let _ = writeln!(stdout, "{}{}", marker, line);
        }
    }
    let _ = stdout.reset();
}
