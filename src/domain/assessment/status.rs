//! AssessmentStatus enum for the session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an assessment session.
///
/// A completed session is immutable and paired with its final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    Active,
    Completed,
}

impl AssessmentStatus {
    /// Returns true if the session can still be mutated.
    pub fn is_mutable(&self) -> bool {
        matches!(self, AssessmentStatus::Active)
    }
}

impl StateMachine for AssessmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AssessmentStatus::*;
        matches!((self, target), (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AssessmentStatus::*;
        match self {
            Active => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessmentStatus::Active => "Active",
            AssessmentStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(AssessmentStatus::default(), AssessmentStatus::Active);
    }

    #[test]
    fn active_is_mutable_completed_is_not() {
        assert!(AssessmentStatus::Active.is_mutable());
        assert!(!AssessmentStatus::Completed.is_mutable());
    }

    #[test]
    fn active_can_complete() {
        assert!(AssessmentStatus::Active.can_transition_to(&AssessmentStatus::Completed));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(AssessmentStatus::Completed.is_terminal());
        assert!(!AssessmentStatus::Completed.can_transition_to(&AssessmentStatus::Active));
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AssessmentStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
