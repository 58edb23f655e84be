// Rootcheck bootstrap runner: runs every registered case and exits non-zero on failure.
// Usage: cargo run --bin test_runner [filter]

use std::env;
use std::process;

use rootcheck::cli::init_tracing;
use rootcheck::harness;
use rootcheck::HarnessError;

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    match harness::run_tests_with_args(&args) {
        Ok(summary) => process::exit(summary.exit_code()),
        Err(e) => {
            // Bad arguments exit like a clap usage error.
            let code = if matches!(e, HarnessError::Usage { .. }) { 2 } else { 1 };
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(code);
        }
    }
}
