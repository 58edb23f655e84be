//! Console and JSON reporting.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::errors::HarnessError;
use crate::harness::{TestCase, TestRegistry, TestResult, TestSummary};

/// Writes one line per result, the summary line and, on failure, the list of
/// failed tests.
pub fn report_results<W: WriteColor>(out: &mut W, results: &[TestResult]) -> io::Result<()> {
    for r in results {
        match r {
            TestResult::Pass { name, source } => {
                write_tag(out, "PASS", Color::Green)?;
                writeln!(out, ": {} [{}]", name, source)?;
            }
            TestResult::Fail {
                name,
                source,
                failures,
            } => {
                write_tag(out, "FAIL", Color::Red)?;
                writeln!(out, ": {} [{}]", name, source)?;
                for failure in failures {
                    writeln!(out, "  {}", failure)?;
                }
            }
            TestResult::Skipped {
                name,
                source,
                reason,
            } => {
                write_tag(out, "SKIP", Color::Yellow)?;
                writeln!(out, ": {} [{}] ({})", name, source, reason)?;
            }
        }
    }

    let summary = TestSummary::from_results(results);
    write!(out, "\nTest summary: total {}, ", results.len())?;
    write_tag(out, "passed", Color::Green)?;
    write!(out, " {}, ", summary.passed)?;
    write_tag(out, "failed", Color::Red)?;
    write!(out, " {}, ", summary.failed)?;
    write_tag(out, "skipped", Color::Yellow)?;
    writeln!(out, " {}", summary.skipped)?;

    if summary.has_failures() {
        writeln!(out, "\nFailed tests:")?;
        for r in results.iter().filter(|r| r.is_failure()) {
            writeln!(out, "  - {}", r.name())?;
        }
    }
    Ok(())
}

/// Prints `Suite.` headers followed by indented case names.
pub fn list_tests<W: Write>(
    out: &mut W,
    registry: &TestRegistry,
    include: impl Fn(&TestCase) -> bool,
) -> io::Result<()> {
    for (suite, cases) in registry.suites() {
        let selected: Vec<_> = cases.into_iter().filter(|&c| include(c)).collect();
        if selected.is_empty() {
            continue;
        }
        writeln!(out, "{}.", suite)?;
        for case in selected {
            writeln!(out, "  {}", case.name)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: TestSummary,
    results: &'a [TestResult],
}

/// Writes the summary and every result to `path` as pretty JSON.
pub fn write_json_report(path: &Path, results: &[TestResult]) -> Result<(), HarnessError> {
    let file = File::create(path).map_err(|e| HarnessError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let report = JsonReport {
        summary: TestSummary::from_results(results),
        results,
    };
    serde_json::to_writer_pretty(&mut writer, &report).map_err(|source| HarnessError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| HarnessError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote JSON report");
    Ok(())
}

fn write_tag<W: WriteColor>(out: &mut W, tag: &str, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", tag)?;
    out.reset()
}
