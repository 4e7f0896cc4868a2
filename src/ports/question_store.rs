//! Question Store Port - lookup into the pre-authored question bank.
//!
//! The bank is discretized to integer difficulty tiers, so callers
//! re-quantize the continuous target difficulty before looking up.

use async_trait::async_trait;

use crate::domain::foundation::{Dimension, QuestionId};
use crate::domain::question::Question;

/// Port for retrieving pre-authored questions by dimension and tier.
///
/// Implementations must try the exact tier first and fall back to the
/// adjacent tiers (one up, one down) before reporting a miss, choose
/// randomly among ties, and bump the chosen question's usage counter.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Finds an unused bank question for the dimension at or near the
    /// tier. `exclude` holds questions already asked this session; a
    /// clean miss is `Ok(None)`, never an error.
    async fn find_by_dimension_and_difficulty(
        &self,
        dimension: Dimension,
        tier: u8,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, StoreError>;
}

/// Question store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store backend unreachable.
    #[error("question store unavailable: {reason}")]
    Unavailable {
        /// What failed underneath.
        reason: String,
    },

    /// A stored row could not be decoded into a valid question.
    #[error("corrupt question record {id}: {reason}")]
    Corrupt {
        /// Offending record identifier.
        id: String,
        /// Why decoding failed.
        reason: String,
    },
}

impl StoreError {
    /// Whether retrying the same lookup could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}
