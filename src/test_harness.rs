//! YAML suite runner.
//!
//! A suite file holds a list of cases. Each case carries a recorded event
//! stream, the tree dump it must normalize to and, optionally, the
//! diagnostics it must report:
//!
//! ```yaml
//! - name: "assignment"
//!   events: |
//!     {"event": "ident", "args": ["x"], "line": 1, "column": 0}
//!     ...
//!   expected: |
//!     (program
//!       (assignment
//!         left: (identifier)
//!         right: (integer)))
//!   diagnostics: ["1: syntax error"]   # optional
//!   skip: false                        # optional
//!   only: false                        # optional
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use rbcst::test_harness::{run_all_tests, HarnessConfig};
//!
//! let summary = run_all_tests(&HarnessConfig::default()).unwrap();
//! if summary.failed > 0 {
//!     std::process::exit(1);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::events::normalize_str;
use crate::{err_msg, CstError};

// =============================================================================
// CORE TYPES
// =============================================================================

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    Pass {
        file: String,
        name: String,
    },
    Fail {
        file: String,
        name: String,
        error: String,
        expected: Option<String>,
        actual: Option<String>,
    },
    Skipped {
        file: String,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct TestCase {
    pub name: String,
    pub events: String,
    pub expected: String,
    #[serde(default)]
    pub diagnostics: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

/// Configuration for suite discovery and reporting.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub suite_root: PathBuf,
    pub use_colors: bool,
    /// Case-insensitive substring a case name must contain.
    pub filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            suite_root: PathBuf::from("tests/suites"),
            use_colors: atty::is(atty::Stream::Stderr),
            filter: None,
        }
    }
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

impl HarnessConfig {
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

// =============================================================================
// DISCOVERY AND LOADING
// =============================================================================

/// All `.yaml`/`.yml` files under `root`, in path order.
pub fn discover_yaml_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>, CstError> {
    let content = fs::read_to_string(path).map_err(|source| CstError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content)
        .map_err(|e| err_msg!(Harness, "{}: {}", path.display(), e))
}

pub fn skip_reason(case: &TestCase, has_only: bool, filter: Option<&str>) -> Option<String> {
    if has_only && !case.only {
        return Some("Not marked 'only' in 'only' mode".to_string());
    }
    if case.skip {
        return Some("Marked 'skip'".to_string());
    }
    if let Some(f) = filter {
        if !case.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(format!("Filtered out by substring: {}", f));
        }
    }
    None
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Two dumps match when they agree up to trailing whitespace.
pub fn dumps_match(expected: &str, actual: &str) -> bool {
    expected.trim_end() == actual.trim_end()
}

pub fn run_test_case(file: String, case: TestCase) -> TestResult {
    let fail = |error: String, expected: Option<String>, actual: Option<String>| TestResult::Fail {
        file: file.clone(),
        name: case.name.clone(),
        error,
        expected,
        actual,
    };

    let normalized = match normalize_str(&case.events) {
        Ok(normalized) => normalized,
        Err(e) => return fail(format!("Normalization failed: {}", e), None, None),
    };

    let diagnostics: Vec<String> = normalized.diagnostics.iter().map(ToString::to_string).collect();
    if diagnostics != case.diagnostics {
        return fail(
            "Diagnostics did not match expected".to_string(),
            Some(case.diagnostics.join("\n")),
            Some(diagnostics.join("\n")),
        );
    }

    let actual = normalized.render();
    if !dumps_match(&case.expected, &actual) {
        return fail(
            "Output did not match expected".to_string(),
            Some(case.expected.trim_end().to_string()),
            Some(actual.trim_end().to_string()),
        );
    }

    TestResult::Pass {
        file: file.clone(),
        name: case.name.clone(),
    }
}

pub fn partition_results(results: &[TestResult]) -> Summary {
    let mut summary = Summary::default();
    for result in results {
        match result {
            TestResult::Pass { .. } => summary.passed += 1,
            TestResult::Fail { .. } => summary.failed += 1,
            TestResult::Skipped { .. } => summary.skipped += 1,
        }
    }
    summary
}

/// Runs every case under the configured root and prints a report.
pub fn run_all_tests(config: &HarnessConfig) -> Result<Summary, CstError> {
    let files = discover_yaml_files(&config.suite_root);
    if files.is_empty() {
        return Err(err_msg!(
            Harness,
            "no suite files under {}",
            config.suite_root.display()
        ));
    }

    let mut all_cases = Vec::new();
    for path in &files {
        let file_name = path.display().to_string();
        for case in load_test_cases(path)? {
            all_cases.push((file_name.clone(), case));
        }
    }
    let has_only = all_cases.iter().any(|(_, case)| case.only);
    tracing::debug!(files = files.len(), cases = all_cases.len(), "suites loaded");

    let results: Vec<TestResult> = all_cases
        .into_iter()
        .map(|(file, case)| match skip_reason(&case, has_only, config.filter.as_deref()) {
            Some(reason) => TestResult::Skipped {
                file,
                name: case.name,
                reason,
            },
            None => run_test_case(file, case),
        })
        .collect();

    report_results(&results, config);
    Ok(partition_results(&results))
}

// =============================================================================
// REPORTING
// =============================================================================

pub fn report_results(results: &[TestResult], config: &HarnessConfig) {
    for r in results {
        match r {
            TestResult::Pass { file, name } => {
                println!("{}: {} [{}]", config.colorize("PASS", GREEN), name, file)
            }
            TestResult::Fail { .. } => print_failure(r, config),
            TestResult::Skipped { file, name, reason } => println!(
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                name,
                file,
                reason
            ),
        }
    }

    let summary = partition_results(results);
    println!(
        "\nTest summary: total {}, {} {}, {} {}, {} {}",
        results.len(),
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    );

    if summary.failed > 0 {
        eprintln!("\nFailed tests:");
        for r in results {
            if let TestResult::Fail { name, .. } = r {
                eprintln!("  - {}", name);
            }
        }
    }
}

pub fn print_failure(r: &TestResult, config: &HarnessConfig) {
    if let TestResult::Fail {
        file,
        name,
        error,
        expected,
        actual,
    } = r
    {
        eprintln!("{}: {} [{}]", config.colorize("FAIL", RED), name, file);
        eprintln!("  Error: {}", error);
        if let (Some(expected), Some(actual)) = (expected, actual) {
            eprintln!("  Diff:");
            print_diff(expected, actual, config);
        }
    }
}

/// Line-by-line comparison.
pub fn print_diff(expected: &str, actual: &str, config: &HarnessConfig) {
    let expected_lines: Vec<_> = expected.lines().collect();
    let actual_lines: Vec<_> = actual.lines().collect();
    let max = expected_lines.len().max(actual_lines.len());
    for i in 0..max {
        let exp = expected_lines.get(i).copied().unwrap_or("");
        let act = actual_lines.get(i).copied().unwrap_or("");
        if exp != act {
            eprintln!("  - expected: {}", config.colorize(exp, GREEN));
            eprintln!("  + actual:   {}", config.colorize(act, RED));
        } else {
            eprintln!("    {}", exp);
        }
    }
}
