//! StartSessionHandler - opens a fresh assessment session.

use std::sync::Arc;

use crate::application::AssessmentError;
use crate::domain::assessment::{Phase, PhaseClassifier, Profile, Tuning};
use crate::domain::foundation::{DomainError, LearnerId, SessionId};
use crate::ports::ProfileRepository;

/// Command to start an assessment for a learner.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub learner_id: String,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub profile: Profile,
    pub phase: Phase,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    repository: Arc<dyn ProfileRepository>,
    tuning: Tuning,
}

impl StartSessionHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, tuning: Tuning) -> Self {
        Self { repository, tuning }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, AssessmentError> {
        let learner_id = LearnerId::new(cmd.learner_id).map_err(DomainError::from)?;
        let profile = Profile::new(SessionId::new(), learner_id);

        self.repository.save(&profile).await?;

        let phase = PhaseClassifier::classify(&profile, &self.tuning);
        tracing::info!(
            session_id = %profile.session_id(),
            learner_id = %profile.learner_id(),
            "assessment session started"
        );

        Ok(StartSessionResult { profile, phase })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockProfileRepository;

    #[tokio::test]
    async fn starts_a_session_with_untouched_bounds() {
        let repository = Arc::new(MockProfileRepository::new());
        let handler = StartSessionHandler::new(repository.clone(), Tuning::default());

        let result = handler
            .handle(StartSessionCommand {
                learner_id: "learner-1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.phase, Phase::Exploration);
        assert_eq!(result.profile.questions_answered(), 0);
        let saved = repository
            .find_by_session(result.profile.session_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved, result.profile);
    }

    #[tokio::test]
    async fn rejects_blank_learner_id() {
        let repository = Arc::new(MockProfileRepository::new());
        let handler = StartSessionHandler::new(repository, Tuning::default());

        let result = handler
            .handle(StartSessionCommand {
                learner_id: "   ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AssessmentError::Domain(_))));
    }
}
