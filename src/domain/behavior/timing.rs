//! Per-question timing metrics, read-only once recorded.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, ValidationError};

/// How a learner spent their time on one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMetrics {
    question_id: QuestionId,
    total_time_ms: u64,
    /// First keystroke or choice selection, if any happened.
    time_to_first_action_ms: Option<u64>,
    /// First hint request, if any happened.
    time_to_first_hint_ms: Option<u64>,
}

impl TimeMetrics {
    /// Records the timing for one answered question.
    ///
    /// # Errors
    /// Rejects first-action or first-hint marks that lie past the total.
    pub fn new(
        question_id: QuestionId,
        total_time_ms: u64,
        time_to_first_action_ms: Option<u64>,
        time_to_first_hint_ms: Option<u64>,
    ) -> Result<Self, ValidationError> {
        for (name, mark) in [
            ("time_to_first_action_ms", time_to_first_action_ms),
            ("time_to_first_hint_ms", time_to_first_hint_ms),
        ] {
            if let Some(mark) = mark {
                if mark > total_time_ms {
                    return Err(ValidationError::out_of_range(
                        name,
                        0.0,
                        total_time_ms as f64,
                        mark as f64,
                    ));
                }
            }
        }
        Ok(Self {
            question_id,
            total_time_ms,
            time_to_first_action_ms,
            time_to_first_hint_ms,
        })
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    pub fn time_to_first_action_ms(&self) -> Option<u64> {
        self.time_to_first_action_ms
    }

    pub fn time_to_first_hint_ms(&self) -> Option<u64> {
        self.time_to_first_hint_ms
    }
}
