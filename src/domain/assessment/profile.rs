//! Profile aggregate - the full per-learner assessment state.
//!
//! One `DimensionState` per dimension plus the session counters. Dimension
//! bounds and counters are mutated exclusively through the bound updater;
//! session counters are bumped by the turn handlers. Each turn is a pure
//! transform `(Profile, Outcome) -> Profile` composed with an explicit
//! load/store at the boundary; nothing here is ambient global state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::domain::assessment::{AssessmentStatus, DimensionState};
use crate::domain::foundation::{
    Dimension, DomainError, ErrorCode, LearnerId, QuestionId, SessionId, StateMachine, Timestamp,
};
use crate::domain::question::Question;

/// How many recently-asked question texts are kept for the generator's
/// repetition avoidance.
pub const RECENT_TEXT_CAPACITY: usize = 10;

/// Per-learner assessment state for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    session_id: SessionId,
    learner_id: LearnerId,
    status: AssessmentStatus,
    dimensions: BTreeMap<Dimension, DimensionState>,

    questions_answered: u32,
    total_time_ms: u64,
    hints_used: u32,
    partial_credits: u32,

    asked_question_ids: Vec<QuestionId>,
    recent_question_texts: VecDeque<String>,

    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    /// Creates a fresh profile with every dimension at full range.
    pub fn new(session_id: SessionId, learner_id: LearnerId) -> Self {
        let now = Timestamp::now();
        Self {
            session_id,
            learner_id,
            status: AssessmentStatus::Active,
            dimensions: Dimension::ALL
                .iter()
                .map(|d| (*d, DimensionState::new()))
                .collect(),
            questions_answered: 0,
            total_time_ms: 0,
            hints_used: 0,
            partial_credits: 0,
            asked_question_ids: Vec::new(),
            recent_question_texts: VecDeque::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the learner being assessed.
    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    /// Returns the state for one dimension.
    pub fn dimension(&self, dimension: Dimension) -> &DimensionState {
        // Every Dimension key is inserted at construction.
        self.dimensions
            .get(&dimension)
            .expect("Profile holds a state for every dimension")
    }

    /// Iterates dimension states in canonical order.
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionState)> {
        self.dimensions.iter().map(|(d, s)| (*d, s))
    }

    /// Returns the first dimension never yet probed, in canonical order.
    pub fn first_untested(&self) -> Option<Dimension> {
        self.dimensions()
            .find(|(_, s)| !s.tested())
            .map(|(d, _)| d)
    }

    /// Total questions answered this session.
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    /// Total answering time in milliseconds.
    pub fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    /// Total hints requested this session.
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Total partial-credit verdicts this session.
    pub fn partial_credits(&self) -> u32 {
        self.partial_credits
    }

    /// IDs of every question already presented (bank exclusion list).
    pub fn asked_question_ids(&self) -> &[QuestionId] {
        &self.asked_question_ids
    }

    /// Returns true if the question was already presented this session.
    pub fn has_asked(&self, id: &QuestionId) -> bool {
        self.asked_question_ids.contains(id)
    }

    /// Recently-presented question texts, oldest first.
    pub fn recent_question_texts(&self) -> Vec<String> {
        self.recent_question_texts.iter().cloned().collect()
    }

    /// When the session started.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// When the profile last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Fails with `SESSION_COMPLETED` unless the session is still active.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionCompleted,
                "Cannot modify a completed assessment session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Records that a question was presented: adds it to the exclusion
    /// list and the recent-text ring.
    ///
    /// # Errors
    ///
    /// - `SESSION_COMPLETED` if the session is over
    /// - `ValidationFailed` if the question was already presented
    pub fn note_question_issued(&mut self, question: &Question) -> Result<(), DomainError> {
        self.ensure_active()?;
        if self.has_asked(question.id()) {
            return Err(DomainError::validation(
                "question_id",
                format!("question {} already presented", question.id()),
            ));
        }
        self.asked_question_ids.push(*question.id());
        self.recent_question_texts
            .push_back(question.text().to_string());
        while self.recent_question_texts.len() > RECENT_TEXT_CAPACITY {
            self.recent_question_texts.pop_front();
        }
        self.touch();
        Ok(())
    }

    /// Bumps the session counters after an answer was evaluated and the
    /// bounds updated.
    pub fn note_answer_submitted(&mut self, partial: bool, time_spent_ms: u64) {
        self.questions_answered += 1;
        self.total_time_ms += time_spent_ms;
        if partial {
            self.partial_credits += 1;
        }
        self.touch();
    }

    /// Counts a hint request.
    ///
    /// # Errors
    ///
    /// - `SESSION_COMPLETED` if the session is over
    pub fn note_hint_used(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.hints_used += 1;
        self.touch();
        Ok(())
    }

    /// Marks the session completed; the profile becomes immutable.
    ///
    /// # Errors
    ///
    /// - `INVALID_STATE_TRANSITION` if already completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(AssessmentStatus::Completed)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Crate-internal (bound updater)
    // ─────────────────────────────────────────────────────────────────────

    /// Mutable access to one dimension state, for the bound updater.
    pub(crate) fn dimension_mut(&mut self, dimension: Dimension) -> &mut DimensionState {
        self.dimensions
            .get_mut(&dimension)
            .expect("Profile holds a state for every dimension")
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
