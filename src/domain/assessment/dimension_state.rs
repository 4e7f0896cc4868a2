//! Per-dimension ability bound state.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::Tuning;
use crate::domain::foundation::{scale, DomainError, ValidationError};

/// Ability bounds and counters for a single dimension.
///
/// # Invariants
///
/// - `SCALE_MIN <= lower_bound <= upper_bound <= SCALE_MAX`
/// - `correct_count <= question_count`
///
/// The invariant holds after every update; transient violations inside the
/// bound updater are resolved before the state is stored back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionState {
    lower_bound: f64,
    upper_bound: f64,
    tested: bool,
    question_count: u32,
    correct_count: u32,
}

impl Default for DimensionState {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionState {
    /// Creates a fresh state spanning the whole scale.
    pub fn new() -> Self {
        Self {
            lower_bound: scale::SCALE_MIN,
            upper_bound: scale::SCALE_MAX,
            tested: false,
            question_count: 0,
            correct_count: 0,
        }
    }

    /// Reconstitutes a state from persistence, re-checking the invariants.
    pub fn reconstitute(
        lower_bound: f64,
        upper_bound: f64,
        tested: bool,
        question_count: u32,
        correct_count: u32,
    ) -> Result<Self, DomainError> {
        if !scale::contains(lower_bound) {
            return Err(ValidationError::out_of_range(
                "lower_bound",
                scale::SCALE_MIN,
                scale::SCALE_MAX,
                lower_bound,
            )
            .into());
        }
        if !scale::contains(upper_bound) {
            return Err(ValidationError::out_of_range(
                "upper_bound",
                scale::SCALE_MIN,
                scale::SCALE_MAX,
                upper_bound,
            )
            .into());
        }
        if lower_bound > upper_bound {
            return Err(DomainError::validation(
                "bounds",
                format!("inverted bounds: {} > {}", lower_bound, upper_bound),
            ));
        }
        if correct_count > question_count {
            return Err(DomainError::validation(
                "correct_count",
                format!(
                    "correct_count {} exceeds question_count {}",
                    correct_count, question_count
                ),
            ));
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            tested,
            question_count,
            correct_count,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the lower ability bound.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Returns the upper ability bound.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Returns the current bound range.
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Returns true once at least one question in this dimension has been
    /// answered.
    pub fn tested(&self) -> bool {
        self.tested
    }

    /// Returns the number of questions answered in this dimension.
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// Returns the number of fully-correct answers.
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Observed accuracy; 0.5 when nothing has been asked yet.
    pub fn accuracy(&self) -> f64 {
        if self.question_count == 0 {
            0.5
        } else {
            f64::from(self.correct_count) / f64::from(self.question_count)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived estimates
    // ─────────────────────────────────────────────────────────────────────

    /// Point estimate of ability: a blend of the two bounds, weighted
    /// toward the lower bound when accuracy is high, snapped to the
    /// half-step grid.
    pub fn estimated_level(&self, tuning: &Tuning) -> f64 {
        let (lower_weight, upper_weight) = if self.accuracy() > tuning.doing_well_threshold {
            (0.6, 0.4)
        } else {
            (0.4, 0.6)
        };
        scale::snap(lower_weight * self.lower_bound + upper_weight * self.upper_bound)
    }

    /// Confidence in the estimate, in `[0, 1]`.
    ///
    /// Weighted sum of range tightness, question count, and accuracy;
    /// structural uncertainty dominates sample count, which dominates raw
    /// accuracy.
    pub fn confidence(&self, tuning: &Tuning) -> f64 {
        let range_confidence = 1.0 - self.range() / scale::SPAN;
        let count_confidence =
            (f64::from(self.question_count) / f64::from(tuning.confidence_count_target)).min(1.0);
        let accuracy_confidence = self.accuracy();

        tuning.range_weight * range_confidence
            + tuning.count_weight * count_confidence
            + tuning.accuracy_weight * accuracy_confidence
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutators (bound updater only)
    // ─────────────────────────────────────────────────────────────────────

    /// Counts an answered question; marks the dimension tested.
    pub(crate) fn note_answer(&mut self, correct: bool) {
        self.tested = true;
        self.question_count += 1;
        if correct {
            self.correct_count += 1;
        }
    }

    /// Stores resolved bounds. Caller guarantees the invariant.
    pub(crate) fn set_bounds(&mut self, lower: f64, upper: f64) {
        debug_assert!(scale::contains(lower) && scale::contains(upper) && lower <= upper);
        self.lower_bound = lower;
        self.upper_bound = upper;
    }
}
