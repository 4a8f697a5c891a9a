//! # Units and Reported Precision
//!
//! Lightweight angle newtypes plus the rounding helpers every pipeline stage
//! uses to fix the reported precision of its outputs.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::units::{round_dp, Degrees, Radians};
//!
//! let tilt: Radians = Degrees(180.0).into();
//! assert_eq!(tilt.0, std::f64::consts::PI);
//!
//! assert_eq!(round_dp(4.3125, 3), 4.313);
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    // Multiply before dividing; to_radians() can differ in the last bit.
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * PI / 180.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0 * 180.0 / PI)
    }
}

impl Radians {
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn abs(self) -> f64 {
        self.0.abs()
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to a fixed number of decimals, half away from zero.
///
/// Rounds the exact binary value of `value`, so `0.0135` (stored just below
/// the midpoint) becomes `0.013`. The result is the double nearest to the
/// rounded decimal. NaN, infinities and magnitudes outside the decimal range
/// pass through unchanged.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    exact
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .unwrap_or(value)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `max` that propagates NaN instead of discarding it.
///
/// `f64::max` returns the non-NaN operand, which would silently turn a
/// missing parameter into a plausible number.
pub fn max_or_nan(value: f64, floor: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        value.max(floor)
    }
}
