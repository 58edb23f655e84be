//! Single assertions against `square_root` and their comparison modes.

use std::fmt;

use serde::Serialize;

use crate::math::{approx_eq, square_root, ulps_eq};

/// ULP budget of gtest's `ASSERT_DOUBLE_EQ`.
pub const DOUBLE_EQ_ULPS: u32 = 4;

/// How an actual value is compared with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Comparison {
    /// `==` on `f64`.
    Exact,
    /// Absolute difference within `tolerance`.
    Approx { tolerance: f64 },
    /// At most `max_ulps` representable doubles apart.
    Ulps { max_ulps: u32 },
}

impl Comparison {
    pub fn matches(&self, expected: f64, actual: f64) -> bool {
        match *self {
            Self::Exact => expected == actual,
            Self::Approx { tolerance } => approx_eq(expected, actual, tolerance),
            Self::Ulps { max_ulps } => ulps_eq(expected, actual, max_ulps),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Approx { tolerance } => write!(f, "within {}", tolerance),
            Self::Ulps { max_ulps } => write!(f, "within {} ulps", max_ulps),
        }
    }
}

/// Whether a failure ends the case (`ASSERT_*`) or not (`EXPECT_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Fatal,
    NonFatal,
}

/// `square_root(input)` compared with `expected`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub input: f64,
    pub expected: f64,
    pub comparison: Comparison,
    pub severity: Severity,
}

impl Assertion {
    /// Fatal exact assertion, the `ASSERT_EQ` form.
    pub fn assert_eq(input: f64, expected: f64) -> Self {
        Self {
            input,
            expected,
            comparison: Comparison::Exact,
            severity: Severity::Fatal,
        }
    }

    /// Non-fatal exact assertion, the `EXPECT_EQ` form.
    pub fn expect_eq(input: f64, expected: f64) -> Self {
        Self {
            severity: Severity::NonFatal,
            ..Self::assert_eq(input, expected)
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Evaluates the assertion; `None` means it held.
    pub fn check(&self, index: usize) -> Option<AssertionFailure> {
        let actual = square_root(self.input);
        if self.comparison.matches(self.expected, actual) {
            return None;
        }
        Some(AssertionFailure {
            index,
            input: self.input,
            expected: self.expected,
            actual,
            comparison: self.comparison,
        })
    }
}

/// A failed assertion, kept as data for the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionFailure {
    pub index: usize,
    pub input: f64,
    pub expected: f64,
    pub actual: f64,
    pub comparison: Comparison,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion #{}: square_root({:?}) expected {:?} ({}), got {:?}",
            self.index + 1,
            self.input,
            self.expected,
            self.comparison,
            self.actual
        )
    }
}
