//! Ordered storage for test cases and the built-in `SquareRootTest` suite.

use crate::harness::{Assertion, TestCase};

/// Suite name of the built-in cases.
pub const BUILTIN_SUITE: &str = "SquareRootTest";

/// Test cases in registration order.
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in suite.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        register_builtin(&mut registry);
        registry
    }

    pub fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// True if any case is marked `only`, which puts the run in "only" mode.
    pub fn has_only(&self) -> bool {
        self.cases.iter().any(|c| c.only)
    }

    /// Cases grouped by suite, preserving first-seen suite order.
    pub fn suites(&self) -> Vec<(&str, Vec<&TestCase>)> {
        let mut groups: Vec<(&str, Vec<&TestCase>)> = Vec::new();
        for case in &self.cases {
            match groups.iter().position(|(suite, _)| *suite == case.suite) {
                Some(i) => groups[i].1.push(case),
                None => groups.push((case.suite.as_str(), vec![case])),
            }
        }
        groups
    }
}

/// Registers `SquareRootTest.PositiveNos` and `SquareRootTest.NegativeNos`.
pub fn register_builtin(registry: &mut TestRegistry) {
    registry.register(
        TestCase::new(BUILTIN_SUITE, "PositiveNos")
            .with_assertion(Assertion::assert_eq(36.0, 6.0))
            .with_assertion(Assertion::assert_eq(324.0, 18.0))
            .with_assertion(Assertion::assert_eq(645.16, 25.4))
            .with_assertion(Assertion::assert_eq(0.0, 0.0)),
    );
    registry.register(
        TestCase::new(BUILTIN_SUITE, "NegativeNos")
            .with_assertion(Assertion::assert_eq(-15.0, -1.0))
            .with_assertion(Assertion::assert_eq(-0.2, -1.0)),
    );
}
