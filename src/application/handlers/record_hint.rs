//! RecordHintHandler - logs a hint request mid-question.

use std::sync::Arc;

use crate::application::AssessmentError;
use crate::domain::behavior::{HintCategory, HintEvent, HintOutcome};
use crate::domain::foundation::{QuestionId, SessionId};
use crate::ports::ProfileRepository;

/// Command recording one hint request.
#[derive(Debug, Clone)]
pub struct RecordHintCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub category: HintCategory,
    /// Milliseconds into the question when the hint was requested.
    pub time_into_question_ms: u64,
}

/// Handler for hint requests.
pub struct RecordHintHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl RecordHintHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RecordHintCommand) -> Result<(), AssessmentError> {
        let mut profile = self
            .repository
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::session_not_found(cmd.session_id))?;
        profile.ensure_active()?;

        // Any prior open hint on this question is now known to have led
        // to another hint, not an answer.
        self.repository
            .resolve_open_hints(
                &cmd.session_id,
                &cmd.question_id,
                HintOutcome::AskedAnotherHint,
                cmd.time_into_question_ms,
            )
            .await?;

        let event = HintEvent::new(cmd.question_id, cmd.category, cmd.time_into_question_ms);
        self.repository.append_hint(&cmd.session_id, &event).await?;

        profile.note_hint_used()?;
        self.repository.save(&profile).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            category = %cmd.category,
            "hint recorded"
        );
        Ok(())
    }
}
