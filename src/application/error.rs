//! Application-layer error type.
//!
//! Collaborator failures are surfaced as retryable where retrying the
//! turn could succeed; domain rejections never are. A turn that fails
//! here has not persisted a half-updated profile.

use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::{EvaluatorError, GeneratorError, StoreError};

/// Errors surfaced by the assessment handlers.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    /// Domain validation or state rejection.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Question bank lookup failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Question generation failure, after any retry.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Answer evaluation failure.
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    /// No profile exists for the session.
    #[error("session {session_id} not found")]
    SessionNotFound {
        /// The session that was looked up.
        session_id: SessionId,
    },
}

impl AssessmentError {
    pub fn session_not_found(session_id: SessionId) -> Self {
        AssessmentError::SessionNotFound { session_id }
    }

    /// Whether the orchestrator may retry the whole turn.
    pub fn is_retryable(&self) -> bool {
        match self {
            AssessmentError::Store(e) => e.is_retryable(),
            AssessmentError::Generator(e) => e.is_retryable(),
            AssessmentError::Evaluator(e) => e.is_retryable(),
            AssessmentError::Domain(_) | AssessmentError::SessionNotFound { .. } => false,
        }
    }
}
