//! Bound updater - the asymmetric confidence-narrowing rule.
//!
//! Pure transform `(Profile, AnswerOutcome) -> Profile`. For each targeted
//! dimension the ability bounds move toward the true level, biased by the
//! verdict. All accuracy thresholds are evaluated against the state as it
//! was *before* this answer (zero questions counts as 0.5 accuracy), so a
//! streak earns leniency for the miss that ends it, not for itself.

use tracing::warn;

use crate::domain::assessment::{AnswerOutcome, DimensionState, Profile, Tuning, Verdict};
use crate::domain::foundation::{scale, DomainError};

/// Stateless holder for the bound update rules.
pub struct BoundUpdater;

impl BoundUpdater {
    /// Applies an answer outcome to a profile, returning the updated copy.
    ///
    /// The input profile is untouched; on error nothing has been mutated.
    ///
    /// # Errors
    ///
    /// - `SESSION_COMPLETED` if the session is no longer active
    pub fn apply(
        profile: &Profile,
        outcome: &AnswerOutcome,
        tuning: &Tuning,
    ) -> Result<Profile, DomainError> {
        profile.ensure_active()?;

        let mut updated = profile.clone();
        for dimension in outcome.dimensions() {
            let state = updated.dimension_mut(*dimension);
            Self::apply_to_state(state, outcome.difficulty(), outcome.verdict(), tuning);
        }
        updated.touch();
        Ok(updated)
    }

    /// Updates one dimension's bounds for a single verdict.
    fn apply_to_state(
        state: &mut DimensionState,
        difficulty: f64,
        verdict: Verdict,
        tuning: &Tuning,
    ) {
        let prior_accuracy = state.accuracy();
        let prior_count = state.question_count();
        state.note_answer(verdict == Verdict::Correct);

        let mut lower = state.lower_bound();
        let mut upper = state.upper_bound();

        match verdict {
            Verdict::Correct => {
                // Competence slightly below the answered difficulty is proven.
                lower = lower.max(difficulty - tuning.correct_margin);
                // A learner on a streak gets room to be probed harder;
                // correctness alone must not cap the search space.
                if prior_accuracy > tuning.doing_well_threshold {
                    upper = upper.max(difficulty + tuning.correct_ceiling_bonus);
                }
            }
            Verdict::Partial => {
                // Soft signal: nudge both bounds, tightening only.
                let floor_target = ((difficulty - tuning.partial_margin)
                    * tuning.partial_lower_shrink)
                    .max(scale::SCALE_MIN);
                if floor_target > lower {
                    lower = floor_target;
                }
                let ceiling_target = difficulty + tuning.partial_margin;
                if ceiling_target < upper {
                    upper = ceiling_target;
                }
            }
            Verdict::Wrong => {
                let ceiling = difficulty - tuning.wrong_margin;
                let lenient = prior_accuracy > tuning.lenient_accuracy_threshold
                    && prior_count >= tuning.lenient_min_questions;
                if lenient {
                    // One miss after a strong streak may be noise, not a
                    // true ceiling; keep some room above the floor.
                    upper = upper.min(ceiling.max(lower + tuning.lenient_floor_margin));
                } else {
                    upper = upper.min(ceiling);
                }
                // Sustained failure means the floor itself was miscalibrated.
                if prior_accuracy < tuning.low_accuracy_threshold {
                    let floor_target = difficulty - tuning.collapse_drop;
                    if floor_target < lower {
                        lower = floor_target;
                    }
                }
            }
        }

        lower = scale::clamp(lower);
        upper = scale::clamp(upper);

        if lower > upper {
            let resolved = Self::resolve_inversion(lower, upper, verdict);
            warn!(
                lower_bound = lower,
                upper_bound = upper,
                resolved,
                verdict = %verdict,
                "inverted ability bounds resolved by verdict-biased average"
            );
            lower = resolved;
            upper = resolved;
        }

        state.set_bounds(lower, upper);
    }

    /// Collapses inverted bounds to a single point: their average, biased
    /// toward whichever bound the verdict supports, so the directional
    /// information of the latest answer survives the repair.
    fn resolve_inversion(lower: f64, upper: f64, verdict: Verdict) -> f64 {
        let resolved = match verdict {
            Verdict::Correct => 0.65 * lower + 0.35 * upper,
            Verdict::Wrong => 0.35 * lower + 0.65 * upper,
            Verdict::Partial => (lower + upper) / 2.0,
        };
        scale::clamp(resolved)
    }
}
