//! Case selection and execution.

use crate::harness::{TestCase, TestFilter, TestRegistry, TestResult};

/// Why a case will not run, if it won't.
pub fn skip_reason(case: &TestCase, has_only: bool, filter: &TestFilter) -> Option<String> {
    if has_only && !case.only {
        return Some("Not marked 'only' in 'only' mode".to_string());
    }
    if case.skip {
        return Some("Marked 'skip'".to_string());
    }
    if case.is_disabled() {
        return Some("Disabled".to_string());
    }
    if !filter.matches(&case.full_name()) {
        return Some(match filter.source() {
            Some(expr) => format!("Filtered out by: {}", expr),
            None => "Filtered out".to_string(),
        });
    }
    None
}

/// Runs one case. A fatal failure ends the case; non-fatal ones accumulate.
pub fn run_test_case(case: &TestCase) -> TestResult {
    let mut failures = Vec::new();
    for (index, assertion) in case.assertions.iter().enumerate() {
        if let Some(failure) = assertion.check(index) {
            failures.push(failure);
            if assertion.is_fatal() {
                break;
            }
        }
    }

    let name = case.full_name();
    let source = case.source.clone();
    if failures.is_empty() {
        tracing::debug!(case = %name, "passed");
        TestResult::Pass { name, source }
    } else {
        tracing::debug!(case = %name, failures = failures.len(), "failed");
        TestResult::Fail {
            name,
            source,
            failures,
        }
    }
}

/// Runs every case in registration order.
///
/// With `fail_fast`, every case after the first failure is skipped.
pub fn run_registry(registry: &TestRegistry, filter: &TestFilter, fail_fast: bool) -> Vec<TestResult> {
    let has_only = registry.has_only();
    let mut stopped = false;

    registry
        .cases()
        .iter()
        .map(|case| {
            let reason = if stopped {
                Some("Stopped after first failure".to_string())
            } else {
                skip_reason(case, has_only, filter)
            };
            if let Some(reason) = reason {
                tracing::debug!(case = %case.full_name(), %reason, "skipped");
                return TestResult::Skipped {
                    name: case.full_name(),
                    source: case.source.clone(),
                    reason,
                };
            }
            let result = run_test_case(case);
            if fail_fast && result.is_failure() {
                stopped = true;
            }
            result
        })
        .collect()
}
