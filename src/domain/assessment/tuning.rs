//! Tunable parameters of the estimation engine.
//!
//! The thresholds and margins here are heuristics without a closed-form
//! derivation; what matters is their direction (reward streaks, forgive an
//! isolated miss after success, fall back hard after sustained failure),
//! so they are carried as data rather than hard-coded constants. Defaults
//! can be overridden from configuration.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// All tunable constants of the bound-tracking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Margin below a correctly-answered difficulty the lower bound rises to.
    pub correct_margin: f64,
    /// How far above a correctly-answered difficulty the ceiling opens when
    /// the learner is doing well.
    pub correct_ceiling_bonus: f64,
    /// Accuracy above which the learner counts as "doing well".
    pub doing_well_threshold: f64,

    /// Margin below a missed difficulty the upper bound drops to.
    pub wrong_margin: f64,
    /// Accuracy above which a single miss is treated leniently.
    pub lenient_accuracy_threshold: f64,
    /// Minimum prior questions in the dimension before the lenient-miss rule
    /// applies.
    pub lenient_min_questions: u32,
    /// On a lenient miss, the ceiling never drops closer than this to the
    /// floor.
    pub lenient_floor_margin: f64,
    /// Accuracy below which sustained failure also pulls the floor down.
    pub low_accuracy_threshold: f64,
    /// How far below a missed difficulty the floor is pulled on sustained
    /// failure.
    pub collapse_drop: f64,

    /// Shrink factor for the partial-credit floor target.
    pub partial_lower_shrink: f64,
    /// Half-width of the partial-credit band around the probed difficulty.
    pub partial_margin: f64,

    /// Bound range at or below which a dimension counts as converged.
    pub convergence_range: f64,
    /// Questions required per dimension before it counts as converged.
    pub min_questions_per_dimension: u32,
    /// Overall questions required before exploration can end.
    pub min_exploration_questions: u32,
    /// Hard cap on total questions per session (termination safety valve).
    pub hard_question_cap: u32,

    /// Bound range above which the pre-vetted bank is still preferred.
    pub bank_range_threshold: f64,
    /// Per-dimension question count at which generation takes over.
    pub bank_question_threshold: u32,

    /// Question count at which count-confidence saturates.
    pub confidence_count_target: u32,
    /// Weight of range confidence (structural uncertainty dominates).
    pub range_weight: f64,
    /// Weight of question-count confidence.
    pub count_weight: f64,
    /// Weight of raw accuracy.
    pub accuracy_weight: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            correct_margin: 0.3,
            correct_ceiling_bonus: 1.5,
            doing_well_threshold: 0.6,
            wrong_margin: 0.5,
            lenient_accuracy_threshold: 0.7,
            lenient_min_questions: 3,
            lenient_floor_margin: 0.3,
            low_accuracy_threshold: 0.4,
            collapse_drop: 1.5,
            partial_lower_shrink: 0.8,
            partial_margin: 0.5,
            convergence_range: 0.5,
            min_questions_per_dimension: 3,
            min_exploration_questions: 5,
            hard_question_cap: 25,
            bank_range_threshold: 2.0,
            bank_question_threshold: 3,
            confidence_count_target: 6,
            range_weight: 0.5,
            count_weight: 0.3,
            accuracy_weight: 0.2,
        }
    }
}

impl Tuning {
    /// Validates that the parameters are internally coherent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("doing_well_threshold", self.doing_well_threshold),
            ("lenient_accuracy_threshold", self.lenient_accuracy_threshold),
            ("low_accuracy_threshold", self.low_accuracy_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::out_of_range(name, 0.0, 1.0, value));
            }
        }
        for (name, value) in [
            ("correct_margin", self.correct_margin),
            ("correct_ceiling_bonus", self.correct_ceiling_bonus),
            ("wrong_margin", self.wrong_margin),
            ("lenient_floor_margin", self.lenient_floor_margin),
            ("collapse_drop", self.collapse_drop),
            ("partial_margin", self.partial_margin),
            ("convergence_range", self.convergence_range),
            ("bank_range_threshold", self.bank_range_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid_format(
                    name,
                    "must be a non-negative finite number",
                ));
            }
        }
        if self.hard_question_cap == 0 {
            return Err(ValidationError::invalid_format(
                "hard_question_cap",
                "must be at least 1",
            ));
        }
        if self.confidence_count_target == 0 {
            return Err(ValidationError::invalid_format(
                "confidence_count_target",
                "must be at least 1",
            ));
        }
        let weight_sum = self.range_weight + self.count_weight + self.accuracy_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(ValidationError::invalid_format(
                "confidence_weights",
                format!("must sum to 1.0, got {}", weight_sum),
            ));
        }
        // The rationale behind the weights must be preserved: structure
        // over sample count over raw accuracy.
        if self.range_weight < self.count_weight || self.count_weight < self.accuracy_weight {
            return Err(ValidationError::invalid_format(
                "confidence_weights",
                "range_weight >= count_weight >= accuracy_weight required",
            ));
        }
        Ok(())
    }
}
