//! FinalizeSessionHandler - closes a session and emits the final report.

use std::sync::Arc;

use crate::application::AssessmentError;
use crate::domain::assessment::{AssessmentReport, Tuning};
use crate::domain::behavior::{BehaviorAnalyzer, HintOutcome};
use crate::domain::foundation::SessionId;
use crate::ports::ProfileRepository;

/// Command to finalize a session.
#[derive(Debug, Clone)]
pub struct FinalizeSessionCommand {
    pub session_id: SessionId,
}

/// Handler for session finalization.
pub struct FinalizeSessionHandler {
    repository: Arc<dyn ProfileRepository>,
    tuning: Tuning,
}

impl FinalizeSessionHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, tuning: Tuning) -> Self {
        Self { repository, tuning }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeSessionCommand,
    ) -> Result<AssessmentReport, AssessmentError> {
        let mut profile = self
            .repository
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::session_not_found(cmd.session_id))?;

        // Freezes the profile; re-finalizing a completed session fails
        // on the status transition.
        profile.complete()?;

        // Hints whose question never got answered are closed as
        // still-working before the analysis runs.
        self.repository
            .close_open_hints(&cmd.session_id, HintOutcome::StillWorking)
            .await?;

        let hints = self.repository.hints_for_session(&cmd.session_id).await?;
        let timings = self.repository.timings_for_session(&cmd.session_id).await?;
        let behavior = BehaviorAnalyzer::analyze(&hints, &timings);

        let report = AssessmentReport::from_profile(&profile, behavior, &self.tuning);
        self.repository.save(&profile).await?;
        self.repository.archive(&profile, &report).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            questions_answered = report.questions_answered,
            hints_used = report.hints_used,
            "assessment session finalized"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockProfileRepository;
    use crate::domain::assessment::{AssessmentStatus, Profile};
    use crate::domain::behavior::{HelpSeekingStyle, HintCategory, HintEvent};
    use crate::domain::foundation::{LearnerId, QuestionId};

    async fn seeded_session(repository: &MockProfileRepository) -> SessionId {
        let profile = Profile::new(SessionId::new(), LearnerId::new("learner-1").unwrap());
        let session_id = *profile.session_id();
        repository.save(&profile).await.unwrap();
        session_id
    }

    #[tokio::test]
    async fn finalizes_and_archives_with_zero_event_defaults() {
        let repository = Arc::new(MockProfileRepository::new());
        let session_id = seeded_session(&repository).await;

        let handler = FinalizeSessionHandler::new(repository.clone(), Tuning::default());
        let report = handler
            .handle(FinalizeSessionCommand { session_id })
            .await
            .unwrap();

        assert_eq!(report.behavior.help_seeking_style, HelpSeekingStyle::Balanced);
        assert_eq!(report.behavior.most_effective_category, None);
        assert_eq!(report.behavior.learning_mode, None);
        assert_eq!(report.behavior.hint_effectiveness, 0.0);

        let (archived_profile, archived_report) = repository.archived(&session_id).unwrap();
        assert_eq!(archived_profile.status(), AssessmentStatus::Completed);
        assert_eq!(archived_report, report);
    }

    #[tokio::test]
    async fn open_hints_are_closed_before_analysis() {
        let repository = Arc::new(MockProfileRepository::new());
        let session_id = seeded_session(&repository).await;
        repository
            .append_hint(
                &session_id,
                &HintEvent::new(QuestionId::new(), HintCategory::Example, 10_000),
            )
            .await
            .unwrap();

        let handler = FinalizeSessionHandler::new(repository.clone(), Tuning::default());
        let report = handler
            .handle(FinalizeSessionCommand { session_id })
            .await
            .unwrap();

        let hints = repository.hints_for_session(&session_id).await.unwrap();
        assert_eq!(hints[0].outcome(), Some(HintOutcome::StillWorking));
        // One hint, zero correct follow-ups.
        assert_eq!(report.behavior.hint_effectiveness, 0.0);
        assert!(report.behavior.learning_mode.is_some());
    }

    #[tokio::test]
    async fn refinalizing_is_rejected() {
        let repository = Arc::new(MockProfileRepository::new());
        let session_id = seeded_session(&repository).await;
        let handler = FinalizeSessionHandler::new(repository.clone(), Tuning::default());

        handler
            .handle(FinalizeSessionCommand { session_id })
            .await
            .unwrap();
        let second = handler.handle(FinalizeSessionCommand { session_id }).await;
        assert!(matches!(second, Err(AssessmentError::Domain(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_rejected() {
        let handler =
            FinalizeSessionHandler::new(Arc::new(MockProfileRepository::new()), Tuning::default());
        let result = handler
            .handle(FinalizeSessionCommand {
                session_id: SessionId::new(),
            })
            .await;
        assert!(matches!(result, Err(AssessmentError::SessionNotFound { .. })));
    }
}
