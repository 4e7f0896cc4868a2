//! Completion gate - the single place that decides when a session ends.

use crate::domain::assessment::{Phase, PhaseClassifier, Profile, Tuning};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every dimension converged and met its question minimum.
    Converged,
    /// The session hit the hard question cap before converging.
    QuestionCapReached,
}

/// Decides whether the assessment should stop after the current turn.
pub struct CompletionGate;

impl CompletionGate {
    /// Returns a stop reason once the session should end, `None` while it
    /// should keep going. The cap is checked first so a capped session
    /// reports the cap even when it happens to converge on its last turn.
    pub fn should_stop(profile: &Profile, tuning: &Tuning) -> Option<StopReason> {
        if profile.questions_answered() >= tuning.hard_question_cap {
            return Some(StopReason::QuestionCapReached);
        }
        if PhaseClassifier::classify(profile, tuning) == Phase::Completion {
            return Some(StopReason::Converged);
        }
        None
    }
}
