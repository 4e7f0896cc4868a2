//! Question selector - decides which dimension and difficulty to probe.
//!
//! Pure arithmetic only; the bank lookup and generation fallback live in
//! the application layer. The selector ranks dimensions by adjusted
//! uncertainty so an under-sampled dimension cannot be starved by one
//! lucky early answer.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{DimensionState, Phase, Profile, Tuning};
use crate::domain::foundation::{scale, Dimension};
use crate::domain::question::QuestionSource;

/// The selector's output: what to probe next and where to get it from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Dimension to probe.
    pub dimension: Dimension,
    /// Target difficulty, snapped to the half-step grid.
    pub target_difficulty: f64,
    /// Preferred question source; the bank may still fall back to
    /// generation when no suitable question exists.
    pub preferred_source: QuestionSource,
}

/// Stateless probe selection.
pub struct QuestionSelector;

impl QuestionSelector {
    /// Picks the next probe for the given profile and phase.
    pub fn probe(profile: &Profile, phase: Phase, tuning: &Tuning) -> ProbeSpec {
        match phase {
            Phase::Exploration => {
                if let Some(dimension) = profile.first_untested() {
                    return ProbeSpec {
                        dimension,
                        target_difficulty: scale::MIDPOINT,
                        preferred_source: QuestionSource::Bank,
                    };
                }
                // All tested but still under the overall minimum: rank by
                // uncertainty like refinement.
                Self::uncertainty_probe(profile, tuning)
            }
            Phase::Refinement => Self::uncertainty_probe(profile, tuning),
            Phase::Completion => Self::verification_probe(profile, tuning),
        }
    }

    /// Adjusted uncertainty: bound range plus a 1/(n+1) term that breaks
    /// ties toward under-sampled dimensions.
    fn adjusted_uncertainty(range: f64, question_count: u32) -> f64 {
        range + 1.0 / (f64::from(question_count) + 1.0)
    }

    fn uncertainty_probe(profile: &Profile, tuning: &Tuning) -> ProbeSpec {
        // Strict comparison keeps the earliest dimension in canonical
        // order on ties.
        Self::probe_by(profile, tuning, |s| {
            Self::adjusted_uncertainty(s.range(), s.question_count())
        })
    }

    /// After the terminal phase: a deterministic verification probe at the
    /// widest remaining dimension's midpoint.
    fn verification_probe(profile: &Profile, tuning: &Tuning) -> ProbeSpec {
        Self::probe_by(profile, tuning, DimensionState::range)
    }

    fn probe_by(
        profile: &Profile,
        tuning: &Tuning,
        score: impl Fn(&DimensionState) -> f64,
    ) -> ProbeSpec {
        let mut best = None;
        for (dimension, state) in profile.dimensions() {
            let value = score(state);
            match best {
                Some((_, _, top)) if value <= top => {}
                _ => best = Some((dimension, state, value)),
            }
        }
        // A profile always holds every dimension, so the loop ran.
        let (dimension, state, _) = match best {
            Some(found) => found,
            None => unreachable!("profile holds a state for every dimension"),
        };

        let midpoint = (state.lower_bound() + state.upper_bound()) / 2.0;
        ProbeSpec {
            dimension,
            target_difficulty: scale::snap(midpoint),
            preferred_source: Self::source_for(state.range(), state.question_count(), tuning),
        }
    }

    /// Bank questions are pre-vetted and cheap, so they are preferred
    /// while the range is still wide and the dimension under-sampled;
    /// once narrowed, a stock question at the exact needed difficulty is
    /// unlikely to exist, so generation takes over.
    fn source_for(range: f64, question_count: u32, tuning: &Tuning) -> QuestionSource {
        if range > tuning.bank_range_threshold && question_count < tuning.bank_question_threshold {
            QuestionSource::Bank
        } else {
            QuestionSource::Generated
        }
    }
}
