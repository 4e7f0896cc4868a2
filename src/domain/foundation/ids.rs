//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for a learner identifier.
const MAX_LEARNER_ID_LENGTH: usize = 128;

/// Unique identifier for an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a question (bank-stored or generated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Creates a new random QuestionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a QuestionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of the learner being assessed.
///
/// Opaque string issued by the identity layer above the engine;
/// the engine only requires it to be non-empty and of sane length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(String);

impl LearnerId {
    /// Creates a LearnerId, validating it is non-empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("learner_id"));
        }
        if trimmed.len() > MAX_LEARNER_ID_LENGTH {
            return Err(ValidationError::invalid_format(
                "learner_id",
                format!("must be {} characters or less", MAX_LEARNER_ID_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn session_id_roundtrips_through_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn question_id_roundtrips_through_string() {
        let id = QuestionId::new();
        let parsed: QuestionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn learner_id_accepts_normal_values() {
        let id = LearnerId::new("learner-42").unwrap();
        assert_eq!(id.as_str(), "learner-42");
    }

    #[test]
    fn learner_id_trims_whitespace() {
        let id = LearnerId::new("  learner-42  ").unwrap();
        assert_eq!(id.as_str(), "learner-42");
    }

    #[test]
    fn learner_id_rejects_empty() {
        assert!(LearnerId::new("").is_err());
        assert!(LearnerId::new("   ").is_err());
    }

    #[test]
    fn learner_id_rejects_too_long() {
        let long = "x".repeat(MAX_LEARNER_ID_LENGTH + 1);
        assert!(LearnerId::new(long).is_err());
    }

    #[test]
    fn session_id_serializes_transparently() {
        let id = SessionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
