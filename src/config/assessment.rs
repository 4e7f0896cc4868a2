//! Assessment engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::Tuning;

/// Assessment engine configuration
///
/// Wraps the engine's tunable constants so individual thresholds can be
/// overridden from the environment, e.g.
/// `SKILLSCOPE__ASSESSMENT__TUNING__HARD_QUESTION_CAP=40`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentConfig {
    /// Engine tuning overrides; unset fields keep their defaults
    #[serde(default)]
    pub tuning: Tuning,
}

impl AssessmentConfig {
    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tuning
            .validate()
            .map_err(|e| ValidationError::InvalidTuning(e.to_string()))
    }
}
