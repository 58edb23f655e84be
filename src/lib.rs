//! Rootcheck: `square_root` with a sentinel contract, plus the gtest-style
//! harness that verifies it.

pub use crate::errors::{HarnessError, RootError};
pub use crate::math::{square_root, try_square_root, NEGATIVE_INPUT_SENTINEL};

pub mod cli;
pub mod errors;
pub mod harness;
pub mod math;
