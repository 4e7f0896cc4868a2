//! Answer outcome value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{scale, Dimension, DomainError, ValidationError};

/// Correctness classification of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Partial,
    Wrong,
}

impl Verdict {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Partial => "partial",
            Verdict::Wrong => "wrong",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The per-turn result fed into the bound updater: which dimensions were
/// probed, at what difficulty, and how the answer was judged.
///
/// Ephemeral; constructed after evaluation, consumed by the updater, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    dimensions: Vec<Dimension>,
    difficulty: f64,
    verdict: Verdict,
}

impl AnswerOutcome {
    /// Creates a validated outcome.
    ///
    /// # Errors
    ///
    /// - `EMPTY_FIELD` if no dimension was targeted
    /// - `OUT_OF_RANGE` if the difficulty lies off the scale
    pub fn new(
        dimensions: Vec<Dimension>,
        difficulty: f64,
        verdict: Verdict,
    ) -> Result<Self, DomainError> {
        if dimensions.is_empty() {
            return Err(ValidationError::empty_field("dimensions").into());
        }
        let difficulty = scale::validate_difficulty(difficulty)?;
        Ok(Self {
            dimensions,
            difficulty,
            verdict,
        })
    }

    /// Returns the targeted dimensions.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Returns the probed difficulty.
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Returns the verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}
