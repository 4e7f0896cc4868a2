//! Final assessment report, emitted once when a session completes.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{Profile, Tuning};
use crate::domain::behavior::BehaviorReport;
use crate::domain::foundation::{Dimension, LearnerId, SessionId, Timestamp};

/// Per-dimension outcome in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: Dimension,
    /// Final point estimate on the half-step grid.
    pub estimated_level: f64,
    /// Confidence in that estimate, in `[0, 1]`.
    pub confidence: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub question_count: u32,
    pub accuracy: f64,
}

/// Immutable summary of a completed session. Archived alongside the
/// frozen profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub session_id: SessionId,
    pub learner_id: LearnerId,
    /// One result per dimension, in canonical order.
    pub dimensions: Vec<DimensionResult>,
    pub questions_answered: u32,
    pub total_time_ms: u64,
    pub hints_used: u32,
    pub partial_credits: u32,
    pub behavior: BehaviorReport,
    pub completed_at: Timestamp,
}

impl AssessmentReport {
    /// Builds the report from a finished profile and its behavior
    /// summary. The profile is read, never mutated.
    pub fn from_profile(profile: &Profile, behavior: BehaviorReport, tuning: &Tuning) -> Self {
        let dimensions = profile
            .dimensions()
            .map(|(dimension, state)| DimensionResult {
                dimension,
                estimated_level: state.estimated_level(tuning),
                confidence: state.confidence(tuning),
                lower_bound: state.lower_bound(),
                upper_bound: state.upper_bound(),
                question_count: state.question_count(),
                accuracy: state.accuracy(),
            })
            .collect();

        Self {
            session_id: *profile.session_id(),
            learner_id: profile.learner_id().clone(),
            dimensions,
            questions_answered: profile.questions_answered(),
            total_time_ms: profile.total_time_ms(),
            hints_used: profile.hints_used(),
            partial_credits: profile.partial_credits(),
            behavior,
            completed_at: Timestamp::now(),
        }
    }
}
