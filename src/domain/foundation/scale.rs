//! The fixed 1-5 ability/difficulty scale.
//!
//! Ability bounds and probe difficulties are continuous values on the
//! closed scale. Reported estimates snap to a half-step grid, while the
//! question bank is discretized to integer tiers, so lookups must
//! re-quantize before hitting the store.

use super::ValidationError;

/// Lowest value on the ability scale.
pub const SCALE_MIN: f64 = 1.0;

/// Highest value on the ability scale.
pub const SCALE_MAX: f64 = 5.0;

/// Grid step for reported ability estimates.
pub const GRID_STEP: f64 = 0.5;

/// Full width of the scale.
pub const SPAN: f64 = SCALE_MAX - SCALE_MIN;

/// Midpoint of the scale (the opening probe difficulty).
pub const MIDPOINT: f64 = (SCALE_MIN + SCALE_MAX) / 2.0;

/// Clamps a value onto the scale.
pub fn clamp(value: f64) -> f64 {
    value.clamp(SCALE_MIN, SCALE_MAX)
}

/// Returns true if the value lies on the scale (inclusive).
pub fn contains(value: f64) -> bool {
    value.is_finite() && (SCALE_MIN..=SCALE_MAX).contains(&value)
}

/// Validates that a difficulty value lies on the scale.
pub fn validate_difficulty(value: f64) -> Result<f64, ValidationError> {
    if contains(value) {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(
            "difficulty",
            SCALE_MIN,
            SCALE_MAX,
            value,
        ))
    }
}

/// Clamps and rounds to the nearest half-step grid value.
pub fn snap(value: f64) -> f64 {
    let clamped = clamp(value);
    (clamped / GRID_STEP).round() * GRID_STEP
}

/// Clamps and rounds to the nearest integer bank tier (1-5).
pub fn bank_tier(value: f64) -> u8 {
    clamp(value).round() as u8
}
