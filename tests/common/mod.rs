//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary suites root populated with the given `(file name, yaml)` pairs.
pub fn suites_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, content) in files {
        write_suite(dir.path(), name, content);
    }
    dir
}

pub fn write_suite(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create suite dir");
    }
    fs::write(&path, content).expect("write suite file");
    path
}

/// Writes raw bytes, for suite files that are not valid UTF-8.
pub fn write_suite_bytes(root: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, bytes).expect("write suite bytes");
    path
}

pub const PASSING_SUITE: &str = r#"
- suite: Extra
  name: PerfectSquares
  assertions:
    - input: 49
      expected: 7
    - input: 1000000.0
      expected: 1000
"#;

pub const FAILING_SUITE: &str = r#"
- suite: Extra
  name: WrongRoot
  assertions:
    - input: 2.0
      expected: 1.5
"#;
