//! Rootcheck error types.
//!
//! Every error is a `thiserror` enum that also derives `miette::Diagnostic`,
//! so the CLI can render it with a stable code and a help line.
//! Assertion failures are not errors; they travel as data in
//! [`crate::harness::TestResult`].

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from the checked math API.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RootError {
    #[error("Math error: square root of negative input {value}")]
    #[diagnostic(
        code(rootcheck::math::negative_input),
        help("`square_root` returns -1.0 for negative input; the checked form reports it instead")
    )]
    NegativeInput { value: f64 },
}

/// Errors raised while loading suites or writing reports.
#[derive(Error, Diagnostic, Debug)]
pub enum HarnessError {
    #[error("Harness error: failed to access {}", path.display())]
    #[diagnostic(code(rootcheck::harness::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Harness error: malformed suite file {}", path.display())]
    #[diagnostic(
        code(rootcheck::harness::yaml),
        help("a suite file is a YAML list of cases, each with `name` and `assertions`")
    )]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Harness error: invalid case '{case}' in {}: {reason}", path.display())]
    #[diagnostic(code(rootcheck::harness::invalid_case))]
    InvalidCase {
        path: PathBuf,
        case: String,
        reason: String,
    },

    #[error("Harness error: unexpected arguments '{args}'")]
    #[diagnostic(
        code(rootcheck::harness::usage),
        help("usage: test_runner [FILTER]; see `rootcheck test --help` for all options")
    )]
    Usage { args: String },

    #[error("Harness error: failed to write JSON report to {}", path.display())]
    #[diagnostic(code(rootcheck::harness::report))]
    Report {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_case(
        path: impl Into<PathBuf>,
        case: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCase {
            path: path.into(),
            case: case.into(),
            reason: reason.into(),
        }
    }
}
