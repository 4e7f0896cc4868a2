//! Question entity and answer tagged unions.
//!
//! A question targets one or more dimensions at a single integer bank tier.
//! The question kind and the submitted answer are closed tagged unions;
//! evaluators pattern-match on the tag rather than downcasting.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{scale, Dimension, DomainError, QuestionId, ValidationError};

/// Minimum number of choices for a multiple-choice question.
pub const MIN_CHOICES: usize = 2;

/// Maximum length for question text.
pub const MAX_TEXT_LENGTH: usize = 4000;

/// Where a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    /// Pre-authored, pre-vetted bank question.
    Bank,
    /// Produced on demand by the generation collaborator.
    Generated,
}

/// The answer-shape family of a question, without payload.
///
/// Used when asking the generator for a question of a particular shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    #[default]
    MultipleChoice,
    FreeText,
    Code,
}

/// Question content, tagged by answer shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Closed question answered by choice index.
    MultipleChoice {
        choices: Vec<String>,
        correct_index: usize,
    },
    /// Open question answered in prose; grading is delegated.
    FreeText { reference_answer: Option<String> },
    /// Question answered with a code snippet.
    Code {
        language: String,
        reference_answer: Option<String>,
    },
}

impl QuestionKind {
    /// Returns the payload-free format tag.
    pub fn format(&self) -> QuestionFormat {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionFormat::MultipleChoice,
            QuestionKind::FreeText { .. } => QuestionFormat::FreeText,
            QuestionKind::Code { .. } => QuestionFormat::Code,
        }
    }
}

/// A learner's submitted answer, tagged to mirror [`QuestionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerInput {
    Choice { index: usize },
    Text { text: String },
    Code { code: String },
}

impl AnswerInput {
    /// Returns true if this answer shape matches the question kind.
    pub fn matches(&self, kind: &QuestionKind) -> bool {
        matches!(
            (self, kind),
            (AnswerInput::Choice { .. }, QuestionKind::MultipleChoice { .. })
                | (AnswerInput::Text { .. }, QuestionKind::FreeText { .. })
                | (AnswerInput::Code { .. }, QuestionKind::Code { .. })
        )
    }
}

/// A question presented to the learner.
///
/// # Invariants
///
/// - `dimensions` is non-empty and duplicate-free
/// - `tier` is an integer point on the 1-5 scale
/// - `text` is non-empty
/// - multiple-choice questions have at least [`MIN_CHOICES`] choices and an
///   in-range `correct_index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    dimensions: Vec<Dimension>,
    tier: u8,
    text: String,
    kind: QuestionKind,
    source: QuestionSource,
}

impl Question {
    /// Creates a validated question.
    pub fn new(
        id: QuestionId,
        dimensions: Vec<Dimension>,
        tier: u8,
        text: String,
        kind: QuestionKind,
        source: QuestionSource,
    ) -> Result<Self, DomainError> {
        if dimensions.is_empty() {
            return Err(ValidationError::empty_field("dimensions").into());
        }
        for (i, dim) in dimensions.iter().enumerate() {
            if dimensions[..i].contains(dim) {
                return Err(DomainError::validation(
                    "dimensions",
                    format!("duplicate dimension {}", dim),
                ));
            }
        }
        if !scale::contains(f64::from(tier)) {
            return Err(ValidationError::out_of_range(
                "tier",
                scale::SCALE_MIN,
                scale::SCALE_MAX,
                f64::from(tier),
            )
            .into());
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("text").into());
        }
        if trimmed.len() > MAX_TEXT_LENGTH {
            return Err(DomainError::validation(
                "text",
                format!("Text must be {} characters or less", MAX_TEXT_LENGTH),
            ));
        }
        if let QuestionKind::MultipleChoice {
            choices,
            correct_index,
        } = &kind
        {
            if choices.len() < MIN_CHOICES {
                return Err(DomainError::validation(
                    "choices",
                    format!("at least {} choices required", MIN_CHOICES),
                ));
            }
            if *correct_index >= choices.len() {
                return Err(DomainError::validation(
                    "correct_index",
                    format!(
                        "index {} out of range for {} choices",
                        correct_index,
                        choices.len()
                    ),
                ));
            }
        }

        Ok(Self {
            id,
            dimensions,
            tier,
            text: trimmed.to_string(),
            kind,
            source,
        })
    }

    /// Returns the question ID.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the targeted dimensions.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Returns the integer difficulty tier (1-5).
    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// Returns the difficulty as a scale value.
    pub fn difficulty(&self) -> f64 {
        f64::from(self.tier)
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Returns where the question came from.
    pub fn source(&self) -> QuestionSource {
        self.source
    }

    /// Returns true if this question targets the given dimension.
    pub fn targets(&self, dimension: Dimension) -> bool {
        self.dimensions.contains(&dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc_kind() -> QuestionKind {
        QuestionKind::MultipleChoice {
            choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_index: 1,
        }
    }

    fn test_question() -> Question {
        Question::new(
            QuestionId::new(),
            vec![Dimension::ControlFlow],
            3,
            "Which loop runs at least once?".to_string(),
            mc_kind(),
            QuestionSource::Bank,
        )
        .unwrap()
    }

    #[test]
    fn new_question_validates() {
        let q = test_question();
        assert_eq!(q.tier(), 3);
        assert_eq!(q.difficulty(), 3.0);
        assert!(q.targets(Dimension::ControlFlow));
        assert!(!q.targets(Dimension::LowLevel));
    }

    #[test]
    fn rejects_empty_dimensions() {
        let result = Question::new(
            QuestionId::new(),
            vec![],
            3,
            "text".to_string(),
            mc_kind(),
            QuestionSource::Bank,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_duplicate_dimensions() {
        let result = Question::new(
            QuestionId::new(),
            vec![Dimension::LowLevel, Dimension::LowLevel],
            3,
            "text".to_string(),
            mc_kind(),
            QuestionSource::Bank,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_off_scale_tier() {
        for tier in [0u8, 6] {
            let result = Question::new(
                QuestionId::new(),
                vec![Dimension::LowLevel],
                tier,
                "text".to_string(),
                mc_kind(),
                QuestionSource::Bank,
            );
            assert!(result.is_err(), "tier {} should be rejected", tier);
        }
    }

    #[test]
    fn rejects_empty_text() {
        let result = Question::new(
            QuestionId::new(),
            vec![Dimension::LowLevel],
            3,
            "   ".to_string(),
            mc_kind(),
            QuestionSource::Bank,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_multiple_choice_with_one_choice() {
        let result = Question::new(
            QuestionId::new(),
            vec![Dimension::LowLevel],
            3,
            "text".to_string(),
            QuestionKind::MultipleChoice {
                choices: vec!["only".to_string()],
                correct_index: 0,
            },
            QuestionSource::Bank,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let result = Question::new(
            QuestionId::new(),
            vec![Dimension::LowLevel],
            3,
            "text".to_string(),
            QuestionKind::MultipleChoice {
                choices: vec!["a".to_string(), "b".to_string()],
                correct_index: 2,
            },
            QuestionSource::Bank,
        );
        assert!(result.is_err());
    }

    #[test]
    fn answer_matches_question_kind() {
        let answer = AnswerInput::Choice { index: 0 };
        assert!(answer.matches(&mc_kind()));
        assert!(!answer.matches(&QuestionKind::FreeText {
            reference_answer: None
        }));

        let text = AnswerInput::Text {
            text: "because".to_string(),
        };
        assert!(text.matches(&QuestionKind::FreeText {
            reference_answer: None
        }));
        assert!(!text.matches(&mc_kind()));
    }

    #[test]
    fn kind_format_strips_payload() {
        assert_eq!(mc_kind().format(), QuestionFormat::MultipleChoice);
        assert_eq!(
            QuestionKind::Code {
                language: "c".to_string(),
                reference_answer: None
            }
            .format(),
            QuestionFormat::Code
        );
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let json = serde_json::to_string(&mc_kind()).unwrap();
        assert!(json.contains("\"type\":\"multiple_choice\""));
        assert!(json.contains("\"correct_index\":1"));
    }

    #[test]
    fn question_roundtrips_through_json() {
        let q = test_question();
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}
