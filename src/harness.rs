//! Rootcheck Test Harness
//!
//! A self-contained, gtest-style runner for the square-root contract. Test
//! cases come from two places: the built-in `SquareRootTest` suite and YAML
//! suite files discovered on disk.
//!
//! # Architecture
//!
//! The harness follows a phase-based model:
//! 1. **Registration**: built-in cases are registered first
//! 2. **Discovery**: YAML suite files are found and loaded
//! 3. **Selection**: only/skip/`DISABLED_`/filter decide what runs
//! 4. **Execution**: each case checks its assertions against `square_root`
//! 5. **Reporting**: console report, optional JSON report, exit status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use rootcheck::harness::{run_all_tests, TestConfig};
//!
//! let config = TestConfig::from_env();
//! let summary = run_all_tests(&config).expect("suites load");
//! if summary.has_failures() {
//!     std::process::exit(1);
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;
use termcolor::ColorChoice;

use crate::errors::HarnessError;

pub mod assertion;
pub mod discovery;
pub mod filter;
pub mod registry;
pub mod report;
pub mod runner;

pub use assertion::{Assertion, AssertionFailure, Comparison, Severity};
pub use filter::TestFilter;
pub use registry::TestRegistry;

/// Source label for cases registered in code.
pub const BUILTIN_SOURCE: &str = "builtin";

/// Name prefix that disables a case, as in gtest.
pub const DISABLED_PREFIX: &str = "DISABLED_";

/// Default root searched for YAML suite files.
pub const DEFAULT_SUITES_ROOT: &str = "tests/suites";

// =============================================================================
// CORE TYPES
// =============================================================================

/// A named group of assertions, identified as `Suite.Name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub suite: String,
    pub name: String,
    /// `builtin` or the suite file path.
    pub source: String,
    pub assertions: Vec<Assertion>,
    pub skip: bool,
    pub only: bool,
}

impl TestCase {
    pub fn new(suite: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            source: BUILTIN_SOURCE.to_string(),
            assertions: Vec::new(),
            skip: false,
            only: false,
        }
    }

    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    pub fn is_disabled(&self) -> bool {
        self.name.starts_with(DISABLED_PREFIX) || self.suite.starts_with(DISABLED_PREFIX)
    }
}

/// Outcome of a single test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestResult {
    Pass {
        name: String,
        source: String,
    },
    Fail {
        name: String,
        source: String,
        failures: Vec<AssertionFailure>,
    },
    Skipped {
        name: String,
        source: String,
        reason: String,
    },
}

impl TestResult {
    pub fn name(&self) -> &str {
        match self {
            Self::Pass { name, .. } | Self::Fail { name, .. } | Self::Skipped { name, .. } => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Aggregate counts for a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl TestSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, r| {
            match r {
                TestResult::Pass { .. } => summary.passed += 1,
                TestResult::Fail { .. } => summary.failed += 1,
                TestResult::Skipped { .. } => summary.skipped += 1,
            }
            summary
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Cases that ran, skipped ones excluded.
    pub fn total_tests(&self) -> usize {
        self.passed + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_tests() == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total_tests() as f64) * 100.0
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for test selection, execution and reporting.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub suites_root: PathBuf,
    pub filter: Option<String>,
    pub color: ColorChoice,
    pub fail_fast: bool,
    pub include_builtin: bool,
    pub json_report: Option<PathBuf>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            suites_root: PathBuf::from(DEFAULT_SUITES_ROOT),
            filter: None,
            color: auto_color(),
            fail_fast: false,
            include_builtin: true,
            json_report: None,
        }
    }
}

impl TestConfig {
    /// Defaults overridden by `ROOTCHECK_FILTER` and `ROOTCHECK_SUITES`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(filter) = std::env::var("ROOTCHECK_FILTER").ok().filter(|f| !f.is_empty()) {
            config.filter = Some(filter);
        }
        if let Some(root) = std::env::var_os("ROOTCHECK_SUITES").filter(|r| !r.is_empty()) {
            config.suites_root = PathBuf::from(root);
        }
        config
    }

    pub fn test_filter(&self) -> TestFilter {
        self.filter
            .as_deref()
            .map(TestFilter::parse)
            .unwrap_or_default()
    }
}

/// Color is on only when stdout is a terminal and `NO_COLOR` is unset.
pub fn auto_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Builds the registry for `config`: built-ins, then every discovered suite.
pub fn build_registry(config: &TestConfig) -> Result<TestRegistry, HarnessError> {
    let mut registry = if config.include_builtin {
        TestRegistry::with_builtin()
    } else {
        TestRegistry::new()
    };
    for path in discovery::discover_suite_files(&config.suites_root)? {
        for case in discovery::load_suite_file(&path)? {
            registry.register(case);
        }
    }
    Ok(registry)
}

/// Runs every registered case, prints the report and returns the summary.
pub fn run_all_tests(config: &TestConfig) -> Result<TestSummary, HarnessError> {
    let registry = build_registry(config)?;
    let results = runner::run_registry(&registry, &config.test_filter(), config.fail_fast);
    let summary = TestSummary::from_results(&results);

    let mut stdout = termcolor::StandardStream::stdout(config.color);
    report::report_results(&mut stdout, &results)
        .map_err(|e| HarnessError::io("<stdout>", e))?;

    if let Some(path) = &config.json_report {
        report::write_json_report(path, &results)?;
    }

    tracing::info!(
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        "test run finished"
    );
    Ok(summary)
}

/// The bootstrap path: configure from the environment and the optional
/// filter argument, then run everything.
///
/// Accepts at most one argument, the filter. Anything starting with `--` is
/// rejected rather than taken as a filter; a leading single `-` is still a
/// negative-only filter such as `-*.NegativeNos`.
pub fn run_tests_with_args(args: &[String]) -> Result<TestSummary, HarnessError> {
    let mut config = TestConfig::from_env();
    match args {
        [] => {}
        [filter] if !filter.starts_with("--") => config.filter = Some(filter.clone()),
        _ => {
            return Err(HarnessError::Usage {
                args: args.join(" "),
            })
        }
    }
    run_all_tests(&config)
}
