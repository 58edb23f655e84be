//! # Square Root
//!
//! The function under test and the floating-point helpers the harness uses
//! to compare its results.
//!
//! ## Contract
//!
//! - Non-negative input: the non-negative real square root.
//! - Negative input: the sentinel `-1.0` ([`NEGATIVE_INPUT_SENTINEL`]).
//!
//! Callers that would rather see an error than a sentinel use
//! [`try_square_root`].

use crate::errors::RootError;

/// Value returned by [`square_root`] when the input is negative.
pub const NEGATIVE_INPUT_SENTINEL: f64 = -1.0;

/// Returns the square root of `value`, or `-1.0` if `value` is negative.
///
/// Negative zero is treated as zero and yields `0.0`.
///
/// Example:
///   square_root(36.0)  ; => 6.0
///   square_root(-15.0) ; => -1.0
pub fn square_root(value: f64) -> f64 {
    if value < 0.0 {
        return NEGATIVE_INPUT_SENTINEL;
    }
    if value == 0.0 {
        return 0.0;
    }
    value.sqrt()
}

/// Checked variant of [`square_root`]: negative input is an error.
pub fn try_square_root(value: f64) -> Result<f64, RootError> {
    if value < 0.0 {
        return Err(RootError::NegativeInput { value });
    }
    Ok(square_root(value))
}

/// True if `result` is the negative-input sentinel.
pub fn is_sentinel(result: f64) -> bool {
    result == NEGATIVE_INPUT_SENTINEL
}

/// Absolute-tolerance comparison.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance
}

/// Compares two doubles by their distance in units in the last place.
///
/// NaN never compares equal. `0.0` and `-0.0` are equal.
pub fn ulps_eq(a: f64, b: f64, max_ulps: u32) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    ulps_distance(a, b) <= u64::from(max_ulps)
}

/// Maps the sign-magnitude bit pattern onto a monotonic unsigned line so
/// that adjacent doubles differ by one.
fn biased_bits(value: f64) -> u64 {
    const SIGN: u64 = 1 << 63;
    let bits = value.to_bits();
    if bits & SIGN != 0 {
        (!bits).wrapping_add(1)
    } else {
        bits | SIGN
    }
}

fn ulps_distance(a: f64, b: f64) -> u64 {
    let (a, b) = (biased_bits(a), biased_bits(b));
    if a >= b {
        a - b
    } else {
        b - a
    }
}
