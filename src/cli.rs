//! The Rootcheck Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Once;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Report;
use termcolor::ColorChoice;

use crate::harness::{self, report, runner, TestConfig};
use crate::math::{square_root, try_square_root};

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "rootcheck",
    version,
    about = "A square-root utility and its self-contained test runner."
)]
pub struct RootcheckArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Print the square root of each value (-1 for negative input).
    Sqrt {
        /// Values to take the square root of.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
        /// Report negative input as an error instead of the -1 sentinel.
        #[arg(long)]
        strict: bool,
    },
    /// Run the built-in cases and every discovered suite file.
    Test {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Skip every case after the first failure.
        #[arg(long)]
        fail_fast: bool,
        /// When to color the report.
        #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
        color: ColorArg,
        /// Also write a JSON report to this path.
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
    /// List the cases a run would execute.
    List {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Options shared by `test` and `list`.
#[derive(Debug, clap::Args)]
pub struct SelectionArgs {
    /// gtest-style filter, e.g. `SquareRootTest.*-*.NegativeNos`.
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Directory searched for YAML suite files.
    #[arg(long, value_name = "DIR")]
    pub suites: Option<PathBuf>,
    /// Leave out the built-in SquareRootTest suite.
    #[arg(long)]
    pub no_builtin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn choice(self) -> ColorChoice {
        match self {
            Self::Auto => harness::auto_color(),
            Self::Always => ColorChoice::Always,
            Self::Never => ColorChoice::Never,
        }
    }
}

impl SelectionArgs {
    /// Environment-derived config with these flags applied on top.
    fn config(&self) -> TestConfig {
        let mut config = TestConfig::from_env();
        if let Some(filter) = &self.filter {
            config.filter = Some(filter.clone());
        }
        if let Some(suites) = &self.suites {
            config.suites_root = suites.clone();
        }
        config.include_builtin = !self.no_builtin;
        config
    }
}

// ============================================================================
// LOGGING
// ============================================================================

static TRACING_INIT: Once = Once::new();

/// Installs the tracing subscriber once, and only when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

// ============================================================================
// COMMAND DISPATCH
// ============================================================================

/// Parses the process arguments, runs the command and returns the exit code.
pub fn run() -> i32 {
    init_tracing();
    let args = RootcheckArgs::parse();

    let result = match args.command {
        ArgsCommand::Sqrt { values, strict } => handle_sqrt(&values, strict),
        ArgsCommand::Test {
            selection,
            fail_fast,
            color,
            json,
        } => {
            let mut config = selection.config();
            config.fail_fast = fail_fast;
            config.color = color.choice();
            config.json_report = json;
            handle_test(&config)
        }
        ArgsCommand::List { selection } => handle_list(&selection.config()),
    };

    match result {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{:?}", report);
            1
        }
    }
}

fn handle_sqrt(values: &[f64], strict: bool) -> Result<i32, Report> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for &value in values {
        let root = if strict {
            try_square_root(value)?
        } else {
            square_root(value)
        };
        writeln!(out, "{}", root).map_err(|e| miette::miette!("failed to write output: {}", e))?;
    }
    Ok(0)
}

fn handle_test(config: &TestConfig) -> Result<i32, Report> {
    let summary = harness::run_all_tests(config)?;
    Ok(summary.exit_code())
}

fn handle_list(config: &TestConfig) -> Result<i32, Report> {
    let registry = harness::build_registry(config)?;
    let filter = config.test_filter();
    let has_only = registry.has_only();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::list_tests(&mut out, &registry, |case| {
        runner::skip_reason(case, has_only, &filter).is_none()
    })
    .map_err(|e| miette::miette!("failed to write output: {}", e))?;
    Ok(0)
}
