//! Answer Evaluator Port - grading a raw answer against a question.
//!
//! Multiple-choice answers can be graded locally by index; free-text and
//! code answers are delegated to an external provider. Either way the
//! result is a verdict plus learner-facing feedback. A failed evaluation
//! is an error, never a guessed verdict.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::assessment::Verdict;
use crate::domain::question::{AnswerInput, Question};

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// Short explanation shown to the learner.
    pub feedback: String,
}

/// Port for answer grading.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    /// Grades `answer` against `question`. Callers validate that the
    /// answer kind matches the question kind before invoking this.
    async fn evaluate(
        &self,
        question: &Question,
        answer: &AnswerInput,
    ) -> Result<Evaluation, EvaluatorError>;
}

/// Answer evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    /// Rate limited by the provider.
    #[error("evaluator rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// The provider did not answer in time.
    #[error("evaluator timed out after {timeout_secs}s")]
    Timeout {
        /// Configured request timeout.
        timeout_secs: u64,
    },

    /// Provider unreachable or returned a server error.
    #[error("evaluator unavailable: {reason}")]
    Unavailable {
        /// What failed underneath.
        reason: String,
    },

    /// The provider answered but no verdict could be extracted.
    #[error("evaluator returned malformed output: {reason}")]
    Malformed {
        /// Why parsing failed.
        reason: String,
    },
}

impl EvaluatorError {
    /// Whether retrying the same evaluation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EvaluatorError::RateLimited { .. }
                | EvaluatorError::Timeout { .. }
                | EvaluatorError::Unavailable { .. }
        )
    }
}
