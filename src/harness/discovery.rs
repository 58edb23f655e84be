//! YAML suite discovery and loading.
//!
//! A suite file is a YAML list of cases:
//!
//! ```yaml
//! - suite: SquareRootTest   # optional, defaults to the file stem
//!   name: PerfectSquares
//!   skip: false             # optional
//!   only: false             # optional
//!   assertions:
//!     - input: 36.0
//!       expected: 6.0
//!     - input: 2.0
//!       expected: 1.4142135623730951
//!       ulps: 4             # optional
//!     - input: 10.0
//!       expected: 3.1623
//!       tolerance: 0.0001   # optional
//!       fatal: false        # optional, defaults to true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::errors::HarnessError;
use crate::harness::{Assertion, Comparison, Severity, TestCase};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseSpec {
    suite: Option<String>,
    name: String,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    only: bool,
    #[serde(default)]
    assertions: Vec<AssertionSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssertionSpec {
    input: f64,
    expected: f64,
    tolerance: Option<f64>,
    ulps: Option<u32>,
    #[serde(default = "default_fatal")]
    fatal: bool,
}

fn default_fatal() -> bool {
    true
}

/// Finds all `.yaml`/`.yml` files under `root`, sorted by path. Symlinks are
/// followed.
///
/// A missing root yields no files; any other traversal failure, including a
/// symlink loop, is an error.
pub fn discover_suite_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, HarnessError> {
    let root = root.as_ref();
    if !root.exists() {
        tracing::debug!(root = %root.display(), "suites root missing");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            HarnessError::io(path, e.into())
        })?;
        if entry.file_type().is_file() && is_suite_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    tracing::debug!(count = files.len(), "discovered suite files");
    Ok(files)
}

fn is_suite_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Reads and validates every case in a suite file.
pub fn load_suite_file(path: &Path) -> Result<Vec<TestCase>, HarnessError> {
    let content = fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    let cases = parse_suite(path, &content)?;
    tracing::debug!(path = %path.display(), cases = cases.len(), "loaded suite file");
    Ok(cases)
}

/// Parses suite YAML; `path` supplies the default suite name and error context.
pub fn parse_suite(path: &Path, content: &str) -> Result<Vec<TestCase>, HarnessError> {
    // An empty file is an empty suite, not a malformed one.
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let specs: Vec<CaseSpec> =
        serde_yaml::from_str(content).map_err(|source| HarnessError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

    let default_suite = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Suite".to_string());

    specs
        .into_iter()
        .map(|spec| to_test_case(path, &default_suite, spec))
        .collect()
}

fn to_test_case(path: &Path, default_suite: &str, spec: CaseSpec) -> Result<TestCase, HarnessError> {
    if spec.name.trim().is_empty() {
        return Err(HarnessError::invalid_case(path, "<unnamed>", "name must not be empty"));
    }
    if spec.assertions.is_empty() {
        return Err(HarnessError::invalid_case(
            path,
            &spec.name,
            "case has no assertions",
        ));
    }
    let suite = spec.suite.unwrap_or_else(|| default_suite.to_string());
    let assertions = spec
        .assertions
        .into_iter()
        .map(|a| to_assertion(path, &spec.name, a))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TestCase {
        suite,
        name: spec.name,
        source: path.display().to_string(),
        assertions,
        skip: spec.skip,
        only: spec.only,
    })
}

fn to_assertion(path: &Path, case: &str, spec: AssertionSpec) -> Result<Assertion, HarnessError> {
    let comparison = match (spec.tolerance, spec.ulps) {
        (Some(_), Some(_)) => {
            return Err(HarnessError::invalid_case(
                path,
                case,
                "an assertion may set `tolerance` or `ulps`, not both",
            ))
        }
        (Some(tolerance), None) if tolerance < 0.0 || tolerance.is_nan() => {
            return Err(HarnessError::invalid_case(
                path,
                case,
                format!("tolerance must be non-negative, got {}", tolerance),
            ))
        }
        (Some(tolerance), None) => Comparison::Approx { tolerance },
        (None, Some(max_ulps)) => Comparison::Ulps { max_ulps },
        (None, None) => Comparison::Exact,
    };
    Ok(Assertion {
        input: spec.input,
        expected: spec.expected,
        comparison,
        severity: if spec.fatal {
            Severity::Fatal
        } else {
            Severity::NonFatal
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    fn parse(content: &str) -> Result<Vec<TestCase>, HarnessError> {
        parse_suite(Path::new("suites/extra_roots.yaml"), content)
    }

    #[test]
    fn suite_defaults_to_file_stem() {
        let cases = parse(
            "- name: Perfect\n  assertions:\n    - input: 49\n      expected: 7\n",
        )
        .unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].full_name(), "extra_roots.Perfect");
        assert_eq!(cases[0].source, "suites/extra_roots.yaml");
        assert_eq!(cases[0].assertions[0], Assertion::assert_eq(49.0, 7.0));
    }

    #[test]
    fn comparison_and_severity_fields() {
        let cases = parse(
            r#"
- suite: Extra
  name: Irrational
  only: true
  assertions:
    - input: 2.0
      expected: 1.4142135623730951
      ulps: 4
    - input: 10.0
      expected: 3.1623
      tolerance: 0.0001
      fatal: false
"#,
        )
        .unwrap();
        let case = &cases[0];
        assert!(case.only);
        assert_eq!(case.assertions[0].comparison, Comparison::Ulps { max_ulps: 4 });
        assert_eq!(
            case.assertions[1].comparison,
            Comparison::Approx { tolerance: 0.0001 }
        );
        assert_eq!(case.assertions[1].severity, Severity::NonFatal);
    }

    #[test]
    fn both_tolerance_and_ulps_is_invalid() {
        let err = parse(
            "- name: Bad\n  assertions:\n    - {input: 2, expected: 1.41, tolerance: 0.1, ulps: 4}\n",
        )
        .unwrap_err();
        assert_eq!(err.code().unwrap().to_string(), "rootcheck::harness::invalid_case");
    }

    #[test]
    fn case_without_assertions_is_invalid() {
        let err = parse("- name: Empty\n").unwrap_err();
        assert!(err.to_string().contains("case has no assertions"));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = parse("- name: [unterminated\n").unwrap_err();
        assert_eq!(err.code().unwrap().to_string(), "rootcheck::harness::yaml");
    }

    #[test]
    fn empty_file_is_empty_suite() {
        assert!(parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn missing_root_discovers_nothing() {
        assert!(discover_suite_files("no/such/suites/dir").unwrap().is_empty());
    }
}
