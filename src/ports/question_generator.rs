//! Question Generator Port - on-demand question synthesis.
//!
//! Invoked when the bank has nothing suitable, typically once bounds have
//! narrowed past the bank's integer grid. Implementations call an
//! external text-generation provider and must hand back a fully-formed,
//! validated question or an error, never a partial object.

use async_trait::async_trait;

use crate::domain::foundation::Dimension;
use crate::domain::question::{Question, QuestionFormat};

/// Port for generating a question tailored to one probe.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generates a question for the dimension at the given continuous
    /// difficulty. `recent_texts` carries the last few question texts so
    /// the provider avoids near-duplicates.
    async fn generate(
        &self,
        dimension: Dimension,
        difficulty: f64,
        format: QuestionFormat,
        recent_texts: &[String],
    ) -> Result<Question, GeneratorError>;
}

/// Question generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Rate limited by the provider.
    #[error("generator rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// The provider did not answer in time.
    #[error("generator timed out after {timeout_secs}s")]
    Timeout {
        /// Configured request timeout.
        timeout_secs: u64,
    },

    /// Provider unreachable or returned a server error.
    #[error("generator unavailable: {reason}")]
    Unavailable {
        /// What failed underneath.
        reason: String,
    },

    /// The provider answered but the payload did not parse into a valid
    /// question. Not retryable; the same prompt yields the same garbage.
    #[error("generator returned malformed output: {reason}")]
    Malformed {
        /// Why validation failed.
        reason: String,
    },
}

impl GeneratorError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeneratorError::RateLimited { .. }
                | GeneratorError::Timeout { .. }
                | GeneratorError::Unavailable { .. }
        )
    }
}
