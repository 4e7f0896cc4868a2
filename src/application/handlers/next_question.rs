//! NextQuestionHandler - selects and sources the next probe.

use std::sync::Arc;

use crate::application::AssessmentError;
use crate::domain::assessment::{
    Phase, PhaseClassifier, ProbeSpec, Profile, QuestionSelector, Tuning,
};
use crate::domain::foundation::{scale, SessionId};
use crate::domain::question::{Question, QuestionFormat, QuestionSource};
use crate::ports::{GeneratorError, ProfileRepository, QuestionGenerator, QuestionStore};

/// Command to fetch the next question for a session.
#[derive(Debug, Clone)]
pub struct NextQuestionCommand {
    pub session_id: SessionId,
    /// Format to request when the question has to be generated.
    pub preferred_format: QuestionFormat,
}

/// The selected question plus the reasoning that picked it.
#[derive(Debug, Clone)]
pub struct NextQuestionResult {
    pub question: Question,
    pub probe: ProbeSpec,
    pub phase: Phase,
}

/// Handler for question selection and sourcing.
pub struct NextQuestionHandler {
    repository: Arc<dyn ProfileRepository>,
    store: Arc<dyn QuestionStore>,
    generator: Arc<dyn QuestionGenerator>,
    tuning: Tuning,
}

impl NextQuestionHandler {
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        store: Arc<dyn QuestionStore>,
        generator: Arc<dyn QuestionGenerator>,
        tuning: Tuning,
    ) -> Self {
        Self {
            repository,
            store,
            generator,
            tuning,
        }
    }

    pub async fn handle(
        &self,
        cmd: NextQuestionCommand,
    ) -> Result<NextQuestionResult, AssessmentError> {
        // 1. Load the profile and refuse completed sessions.
        let mut profile = self
            .repository
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::session_not_found(cmd.session_id))?;
        profile.ensure_active()?;

        // 2. Pure selection: phase, then probe.
        let phase = PhaseClassifier::classify(&profile, &self.tuning);
        let probe = QuestionSelector::probe(&profile, phase, &self.tuning);

        // 3. Source the question. The bank is discretized, so the
        // continuous target is re-quantized to its integer grid; a bank
        // miss always falls through to generation.
        let question = match probe.preferred_source {
            QuestionSource::Bank => {
                let bank_hit = self
                    .store
                    .find_by_dimension_and_difficulty(
                        probe.dimension,
                        scale::bank_tier(probe.target_difficulty),
                        profile.asked_question_ids(),
                    )
                    .await?;
                match bank_hit {
                    Some(question) => question,
                    None => self.generate(&profile, &probe, cmd.preferred_format).await?,
                }
            }
            QuestionSource::Generated => {
                self.generate(&profile, &probe, cmd.preferred_format).await?
            }
        };

        // 4. Record the issue (duplicate-ID rejection lives here) and save.
        profile.note_question_issued(&question)?;
        self.repository.save(&profile).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            dimension = %probe.dimension,
            target_difficulty = probe.target_difficulty,
            source = ?question.source(),
            phase = ?phase,
            "question selected"
        );

        Ok(NextQuestionResult {
            question,
            probe,
            phase,
        })
    }

    /// Generates a question, retrying once on a transient provider error.
    async fn generate(
        &self,
        profile: &Profile,
        probe: &ProbeSpec,
        format: QuestionFormat,
    ) -> Result<Question, GeneratorError> {
        let recent_texts = profile.recent_question_texts();
        match self
            .generator
            .generate(probe.dimension, probe.target_difficulty, format, &recent_texts)
            .await
        {
            Ok(question) => Ok(question),
            Err(err) if err.is_retryable() => {
                tracing::warn!(
                    session_id = %profile.session_id(),
                    error = %err,
                    "question generation failed, retrying once"
                );
                self.generator
                    .generate(probe.dimension, probe.target_difficulty, format, &recent_texts)
                    .await
            }
            Err(err) => Err(err),
        }
    }
}
