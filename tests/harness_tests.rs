//! Registry construction and runs over on-disk suites.

mod common;

use common::{suites_dir, write_suite_bytes, FAILING_SUITE, PASSING_SUITE};
use miette::Diagnostic;
use rootcheck::harness::runner::run_registry;
use rootcheck::harness::{build_registry, discovery, TestConfig, TestResult, TestSummary};
use termcolor::ColorChoice;

fn config_for(root: &std::path::Path) -> TestConfig {
    TestConfig {
        suites_root: root.to_path_buf(),
        color: ColorChoice::Never,
        ..TestConfig::default()
    }
}

fn run(config: &TestConfig) -> Vec<TestResult> {
    let registry = build_registry(config).unwrap();
    run_registry(&registry, &config.test_filter(), config.fail_fast)
}

#[test]
fn builtin_cases_pass() {
    let dir = suites_dir(&[]);
    let results = run(&config_for(dir.path()));
    assert_eq!(
        TestSummary::from_results(&results),
        TestSummary { passed: 2, failed: 0, skipped: 0 }
    );
}

#[test]
fn builtin_cases_come_before_discovered_ones() {
    let dir = suites_dir(&[("b.yaml", FAILING_SUITE), ("a/extra.yml", PASSING_SUITE)]);
    let registry = build_registry(&config_for(dir.path())).unwrap();
    let names: Vec<_> = registry.cases().iter().map(|c| c.full_name()).collect();
    assert_eq!(
        names,
        [
            "SquareRootTest.PositiveNos",
            "SquareRootTest.NegativeNos",
            "Extra.PerfectSquares",
            "Extra.WrongRoot",
        ]
    );
}

#[test]
fn failing_suite_case_fails_the_run() {
    let dir = suites_dir(&[("extra.yaml", FAILING_SUITE)]);
    let results = run(&config_for(dir.path()));
    let summary = TestSummary::from_results(&results);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
    let TestResult::Fail { failures, source, .. } = &results[2] else {
        panic!("expected Extra.WrongRoot to fail");
    };
    assert!(source.ends_with("extra.yaml"));
    assert_eq!(failures[0].actual, 2.0_f64.sqrt());
}

#[test]
fn fail_fast_skips_remaining_cases() {
    let dir = suites_dir(&[("a.yaml", FAILING_SUITE), ("b.yaml", PASSING_SUITE)]);
    let config = TestConfig {
        fail_fast: true,
        include_builtin: false,
        ..config_for(dir.path())
    };
    let results = run(&config);
    assert!(results[0].is_failure());
    assert!(matches!(
        &results[1],
        TestResult::Skipped { reason, .. } if reason == "Stopped after first failure"
    ));
}

#[test]
fn only_mode_runs_marked_cases() {
    let only = "- name: Focus\n  only: true\n  assertions:\n    - {input: 9, expected: 3}\n";
    let dir = suites_dir(&[("focus.yaml", only)]);
    let results = run(&config_for(dir.path()));
    let summary = TestSummary::from_results(&results);
    assert_eq!(summary, TestSummary { passed: 1, failed: 0, skipped: 2 });
    assert!(matches!(&results[2], TestResult::Pass { name, .. } if name == "focus.Focus"));
}

#[test]
fn filter_and_disabled_prefix_skip_cases() {
    let disabled =
        "- name: DISABLED_Broken\n  assertions:\n    - {input: 2, expected: 9}\n";
    let dir = suites_dir(&[("extra.yaml", disabled)]);
    let config = TestConfig {
        filter: Some("*-*.NegativeNos".to_string()),
        ..config_for(dir.path())
    };
    let results = run(&config);
    let summary = TestSummary::from_results(&results);
    assert_eq!(summary, TestSummary { passed: 1, failed: 0, skipped: 2 });
}

#[test]
fn malformed_suite_aborts_loading() {
    let dir = suites_dir(&[("bad.yaml", "- name: [oops\n")]);
    let err = build_registry(&config_for(dir.path())).unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "rootcheck::harness::yaml");
}

#[test]
fn unreadable_suite_aborts_loading() {
    let dir = suites_dir(&[]);
    write_suite_bytes(dir.path(), "binary.yaml", &[0xff, 0xfe, 0x00]);
    let err = build_registry(&config_for(dir.path())).unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "rootcheck::harness::io");
    assert!(err.to_string().contains("binary.yaml"));
}

#[cfg(unix)]
#[test]
fn symlinked_suites_are_discovered() {
    use std::os::unix::fs::symlink;

    let shared = suites_dir(&[("shared.yaml", PASSING_SUITE), ("nested/more.yml", FAILING_SUITE)]);
    let root = suites_dir(&[]);
    symlink(shared.path().join("shared.yaml"), root.path().join("link.yaml")).unwrap();
    symlink(shared.path().join("nested"), root.path().join("linked_dir")).unwrap();

    let files = discovery::discover_suite_files(root.path()).unwrap();
    assert_eq!(
        files,
        [root.path().join("link.yaml"), root.path().join("linked_dir/more.yml")]
    );

    let registry = build_registry(&config_for(root.path())).unwrap();
    assert_eq!(registry.len(), 4);
}

#[cfg(unix)]
#[test]
fn symlink_loop_is_a_load_error() {
    use std::os::unix::fs::symlink;

    let root = suites_dir(&[("extra.yaml", PASSING_SUITE)]);
    symlink(root.path(), root.path().join("loop")).unwrap();
    let err = discovery::discover_suite_files(root.path()).unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "rootcheck::harness::io");
}

#[test]
fn non_yaml_files_are_ignored() {
    let dir = suites_dir(&[("notes.txt", "not a suite"), ("extra.yaml", PASSING_SUITE)]);
    let files = discovery::discover_suite_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
}

#[test]
fn shipped_suites_pass() {
    let config = config_for(std::path::Path::new("tests/suites"));
    let results = run(&config);
    let summary = TestSummary::from_results(&results);
    assert_eq!(summary.failed, 0, "{:?}", results);
    assert_eq!(summary.passed, 5);
}
