//! Hint request events.
//!
//! An event is created the moment a learner asks for a hint; its outcome
//! is back-filled exactly once, when the question is answered or the
//! session is finalized, and the event is immutable from then on.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, Timestamp};

/// Closed set of hint kinds the tutor can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintCategory {
    Conceptual,
    Syntactic,
    Structural,
    Example,
    Elimination,
}

impl HintCategory {
    pub const ALL: [HintCategory; 5] = [
        HintCategory::Conceptual,
        HintCategory::Syntactic,
        HintCategory::Structural,
        HintCategory::Example,
        HintCategory::Elimination,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HintCategory::Conceptual => "conceptual",
            HintCategory::Syntactic => "syntactic",
            HintCategory::Structural => "structural",
            HintCategory::Example => "example",
            HintCategory::Elimination => "elimination",
        }
    }
}

impl std::fmt::Display for HintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What happened after the hint was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintOutcome {
    AnsweredCorrectly,
    AnsweredWrong,
    AskedAnotherHint,
    StillWorking,
}

impl HintOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            HintOutcome::AnsweredCorrectly => "answered_correctly",
            HintOutcome::AnsweredWrong => "answered_wrong",
            HintOutcome::AskedAnotherHint => "asked_another_hint",
            HintOutcome::StillWorking => "still_working",
        }
    }
}

impl std::fmt::Display for HintOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hint request, tied to the question it was asked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintEvent {
    question_id: QuestionId,
    category: HintCategory,
    /// Milliseconds into the question when the hint was requested.
    time_into_question_ms: u64,
    outcome: Option<HintOutcome>,
    /// Milliseconds from the hint to the eventual answer, once resolved.
    time_to_answer_ms: Option<u64>,
    requested_at: Timestamp,
}

impl HintEvent {
    /// Records a fresh, unresolved hint request.
    pub fn new(
        question_id: QuestionId,
        category: HintCategory,
        time_into_question_ms: u64,
    ) -> Self {
        Self {
            question_id,
            category,
            time_into_question_ms,
            outcome: None,
            time_to_answer_ms: None,
            requested_at: Timestamp::now(),
        }
    }

    /// Rebuilds an event from storage without re-stamping it.
    pub fn reconstitute(
        question_id: QuestionId,
        category: HintCategory,
        time_into_question_ms: u64,
        outcome: Option<HintOutcome>,
        time_to_answer_ms: Option<u64>,
        requested_at: Timestamp,
    ) -> Self {
        Self {
            question_id,
            category,
            time_into_question_ms,
            outcome,
            time_to_answer_ms,
            requested_at,
        }
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn category(&self) -> HintCategory {
        self.category
    }

    pub fn time_into_question_ms(&self) -> u64 {
        self.time_into_question_ms
    }

    pub fn outcome(&self) -> Option<HintOutcome> {
        self.outcome
    }

    pub fn time_to_answer_ms(&self) -> Option<u64> {
        self.time_to_answer_ms
    }

    pub fn requested_at(&self) -> &Timestamp {
        &self.requested_at
    }

    /// True while the outcome has not been back-filled.
    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }

    /// Back-fills the outcome when the question is answered.
    /// `answered_at_ms` is measured from the start of the question, on
    /// the same clock as `time_into_question_ms`.
    ///
    /// # Errors
    /// Returns `HINT_ALREADY_RESOLVED` when the event was resolved before.
    pub fn resolve_at(&mut self, outcome: HintOutcome, answered_at_ms: u64) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.outcome = Some(outcome);
        self.time_to_answer_ms = Some(answered_at_ms.saturating_sub(self.time_into_question_ms));
        Ok(())
    }

    /// Closes an event that never saw an answer, e.g. at session end.
    ///
    /// # Errors
    /// Returns `HINT_ALREADY_RESOLVED` when the event was resolved before.
    pub fn resolve_unanswered(&mut self, outcome: HintOutcome) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.outcome = Some(outcome);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if let Some(existing) = self.outcome {
            return Err(DomainError::new(
                ErrorCode::HintAlreadyResolved,
                format!("hint event already resolved as {}", existing),
            )
            .with_detail("question_id", self.question_id.to_string()));
        }
        Ok(())
    }
}
