//! Scripted evaluator - local grading without a provider round-trip.
//!
//! Multiple-choice answers are graded by index. Free-text and code
//! answers are graded by normalized comparison against the reference
//! answer, which is good enough for tests and offline demos but not for
//! real free-form grading. A queue of verdict overrides lets tests
//! script exact outcome sequences, partial credit included.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::assessment::Verdict;
use crate::domain::question::{AnswerInput, Question, QuestionKind};
use crate::ports::{AnswerEvaluator, Evaluation, EvaluatorError};

/// Local [`AnswerEvaluator`] implementation.
///
/// # Panics
/// Methods panic if the internal lock is poisoned.
pub struct ScriptedEvaluator {
    overrides: Mutex<VecDeque<Verdict>>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self {
            overrides: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues a verdict that overrides local grading for one evaluation.
    /// Overrides are consumed in the order they were pushed.
    pub fn push_verdict(&self, verdict: Verdict) {
        self.overrides.lock().expect("lock poisoned").push_back(verdict);
    }

    fn grade(question: &Question, answer: &AnswerInput) -> Verdict {
        match (question.kind(), answer) {
            (
                QuestionKind::MultipleChoice { correct_index, .. },
                AnswerInput::Choice { index },
            ) => {
                if index == correct_index {
                    Verdict::Correct
                } else {
                    Verdict::Wrong
                }
            }
            (QuestionKind::FreeText { reference_answer }, AnswerInput::Text { text }) => {
                Self::grade_text(reference_answer.as_deref(), text)
            }
            (QuestionKind::Code { reference_answer, .. }, AnswerInput::Code { code }) => {
                Self::grade_text(reference_answer.as_deref(), code)
            }
            // Shape mismatches are rejected upstream; grade defensively
            // anyway rather than panic.
            _ => Verdict::Wrong,
        }
    }

    /// Without a reference answer there is nothing to compare against
    /// locally, so the verdict is Wrong. Script an override (or use the
    /// HTTP provider) for referenceless questions.
    fn grade_text(reference: Option<&str>, submitted: &str) -> Verdict {
        match reference {
            Some(reference) if normalize(submitted) == normalize(reference) => Verdict::Correct,
            _ => Verdict::Wrong,
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Default for ScriptedEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerEvaluator for ScriptedEvaluator {
    async fn evaluate(
        &self,
        question: &Question,
        answer: &AnswerInput,
    ) -> Result<Evaluation, EvaluatorError> {
        let verdict = match self.overrides.lock().expect("lock poisoned").pop_front() {
            Some(scripted) => scripted,
            None => Self::grade(question, answer),
        };
        let feedback = match verdict {
            Verdict::Correct => "Correct.".to_string(),
            Verdict::Partial => "Partially correct.".to_string(),
            Verdict::Wrong => "Not quite.".to_string(),
        };
        Ok(Evaluation { verdict, feedback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Dimension, QuestionId};
    use crate::domain::question::QuestionSource;

    fn mc_question() -> Question {
        Question::new(
            QuestionId::new(),
            vec![Dimension::LowLevel],
            3,
            "Which register holds the stack pointer?".to_string(),
            QuestionKind::MultipleChoice {
                choices: vec!["r0".to_string(), "sp".to_string(), "pc".to_string()],
                correct_index: 1,
            },
            QuestionSource::Bank,
        )
        .unwrap()
    }

    fn text_question() -> Question {
        Question::new(
            QuestionId::new(),
            vec![Dimension::ControlFlow],
            2,
            "Name the loop that always runs at least once.".to_string(),
            QuestionKind::FreeText {
                reference_answer: Some("do while".to_string()),
            },
            QuestionSource::Bank,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn grades_multiple_choice_by_index() {
        let evaluator = ScriptedEvaluator::new();
        let question = mc_question();

        let right = evaluator
            .evaluate(&question, &AnswerInput::Choice { index: 1 })
            .await
            .unwrap();
        assert_eq!(right.verdict, Verdict::Correct);

        let wrong = evaluator
            .evaluate(&question, &AnswerInput::Choice { index: 0 })
            .await
            .unwrap();
        assert_eq!(wrong.verdict, Verdict::Wrong);
    }

    #[tokio::test]
    async fn grades_free_text_case_and_whitespace_insensitively() {
        let evaluator = ScriptedEvaluator::new();
        let question = text_question();

        let result = evaluator
            .evaluate(
                &question,
                &AnswerInput::Text {
                    text: "  Do   WHILE ".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.verdict, Verdict::Correct);
    }

    #[tokio::test]
    async fn free_text_without_a_reference_grades_wrong() {
        let evaluator = ScriptedEvaluator::new();
        let question = Question::new(
            QuestionId::new(),
            vec![Dimension::Decomposition],
            4,
            "Sketch an interrupt-driven UART receive path.".to_string(),
            QuestionKind::FreeText {
                reference_answer: None,
            },
            QuestionSource::Generated,
        )
        .unwrap();

        let result = evaluator
            .evaluate(
                &question,
                &AnswerInput::Text {
                    text: "ring buffer filled from the ISR".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.verdict, Verdict::Wrong);
    }

    #[tokio::test]
    async fn scripted_verdicts_override_grading_in_order() {
        let evaluator = ScriptedEvaluator::new();
        evaluator.push_verdict(Verdict::Partial);
        evaluator.push_verdict(Verdict::Wrong);
        let question = mc_question();
        let right_answer = AnswerInput::Choice { index: 1 };

        for expected in [Verdict::Partial, Verdict::Wrong, Verdict::Correct] {
            let result = evaluator.evaluate(&question, &right_answer).await.unwrap();
            assert_eq!(result.verdict, expected);
        }
    }
}
