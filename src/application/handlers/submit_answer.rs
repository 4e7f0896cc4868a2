//! SubmitAnswerHandler - evaluates one answer and advances the session.
//!
//! The profile is saved exactly once, after every in-memory mutation
//! succeeded, so a collaborator failure mid-turn never leaves a
//! half-updated profile behind.

use std::sync::Arc;

use crate::application::AssessmentError;
use crate::domain::assessment::{
    AnswerOutcome, BoundUpdater, CompletionGate, Phase, PhaseClassifier, StopReason, Tuning,
    Verdict,
};
use crate::domain::behavior::{HintOutcome, TimeMetrics};
use crate::domain::foundation::{DomainError, SessionId, ValidationError};
use crate::domain::question::{AnswerInput, Question};
use crate::ports::{AnswerEvaluator, ProfileRepository};

/// Command carrying one submitted answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    /// The question as it was presented this turn.
    pub question: Question,
    pub answer: AnswerInput,
    /// Wall time spent on the question, in milliseconds.
    pub time_spent_ms: u64,
    pub time_to_first_action_ms: Option<u64>,
    pub time_to_first_hint_ms: Option<u64>,
}

/// What the learner (and the orchestrator) see after a turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub verdict: Verdict,
    pub feedback: String,
    pub phase: Phase,
    /// Set once the completion gate fires; the orchestrator should
    /// finalize instead of asking for another question.
    pub stop_reason: Option<StopReason>,
}

impl TurnResult {
    pub fn session_complete(&self) -> bool {
        self.stop_reason.is_some()
    }
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    repository: Arc<dyn ProfileRepository>,
    evaluator: Arc<dyn AnswerEvaluator>,
    tuning: Tuning,
}

impl SubmitAnswerHandler {
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        evaluator: Arc<dyn AnswerEvaluator>,
        tuning: Tuning,
    ) -> Self {
        Self {
            repository,
            evaluator,
            tuning,
        }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<TurnResult, AssessmentError> {
        // 1. Load the profile and refuse completed sessions.
        let profile = self
            .repository
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::session_not_found(cmd.session_id))?;
        profile.ensure_active()?;

        // 2. Reject a mismatched answer shape before touching anything.
        if !cmd.answer.matches(cmd.question.kind()) {
            return Err(DomainError::from(ValidationError::invalid_format(
                "answer",
                "answer shape does not match the question kind",
            ))
            .into());
        }

        // 3. Grade. A failed evaluation aborts the turn; a verdict is
        // never guessed.
        let evaluation = self.evaluator.evaluate(&cmd.question, &cmd.answer).await?;

        // 4. Apply the bound update and the session counters in memory.
        let outcome = AnswerOutcome::new(
            cmd.question.dimensions().to_vec(),
            cmd.question.difficulty(),
            evaluation.verdict,
        )?;
        let mut profile = BoundUpdater::apply(&profile, &outcome, &self.tuning)?;
        profile.note_answer_submitted(evaluation.verdict == Verdict::Partial, cmd.time_spent_ms);

        // 5. Back-fill open hints on this question and record the timing.
        let hint_outcome = match evaluation.verdict {
            Verdict::Correct => HintOutcome::AnsweredCorrectly,
            Verdict::Partial | Verdict::Wrong => HintOutcome::AnsweredWrong,
        };
        self.repository
            .resolve_open_hints(
                &cmd.session_id,
                cmd.question.id(),
                hint_outcome,
                cmd.time_spent_ms,
            )
            .await?;
        let metrics = TimeMetrics::new(
            *cmd.question.id(),
            cmd.time_spent_ms,
            cmd.time_to_first_action_ms,
            cmd.time_to_first_hint_ms,
        )
        .map_err(DomainError::from)?;
        self.repository.append_timing(&cmd.session_id, &metrics).await?;

        // 6. Single atomic save, then report where the session stands.
        self.repository.save(&profile).await?;

        let phase = PhaseClassifier::classify(&profile, &self.tuning);
        let stop_reason = CompletionGate::should_stop(&profile, &self.tuning);
        tracing::debug!(
            session_id = %cmd.session_id,
            question_id = %cmd.question.id(),
            verdict = %evaluation.verdict,
            phase = ?phase,
            stop_reason = ?stop_reason,
            "answer recorded"
        );

        Ok(TurnResult {
            verdict: evaluation.verdict,
            feedback: evaluation.feedback,
            phase,
            stop_reason,
        })
    }
}
