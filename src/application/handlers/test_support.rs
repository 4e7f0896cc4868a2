//! Shared mock collaborators for handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::assessment::{AssessmentReport, Profile, Verdict};
use crate::domain::behavior::{HintEvent, HintOutcome, TimeMetrics};
use crate::domain::foundation::{scale, Dimension, DomainError, QuestionId, SessionId};
use crate::domain::question::{Question, QuestionFormat, QuestionKind, QuestionSource};
use crate::ports::{
    AnswerEvaluator, Evaluation, EvaluatorError, GeneratorError, ProfileRepository,
    QuestionGenerator, QuestionStore, StoreError,
};

pub(crate) fn mc_kind() -> QuestionKind {
    QuestionKind::MultipleChoice {
        choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        correct_index: 0,
    }
}

pub(crate) fn mc_answer(index: usize) -> crate::domain::question::AnswerInput {
    crate::domain::question::AnswerInput::Choice { index }
}

pub(crate) fn bank_question(dimension: Dimension, tier: u8) -> Question {
    let id = QuestionId::new();
    Question::new(
        id,
        vec![dimension],
        tier,
        format!("bank question {}", id),
        mc_kind(),
        QuestionSource::Bank,
    )
    .unwrap()
}

/// In-memory ProfileRepository with the same atomicity semantics as the
/// real adapters: a save replaces the whole profile.
pub(crate) struct MockProfileRepository {
    profiles: Mutex<HashMap<SessionId, Profile>>,
    hints: Mutex<HashMap<SessionId, Vec<HintEvent>>>,
    timings: Mutex<HashMap<SessionId, Vec<TimeMetrics>>>,
    archives: Mutex<HashMap<SessionId, (Profile, AssessmentReport)>>,
}

impl MockProfileRepository {
    pub(crate) fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            hints: Mutex::new(HashMap::new()),
            timings: Mutex::new(HashMap::new()),
            archives: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn archived(&self, session_id: &SessionId) -> Option<(Profile, AssessmentReport)> {
        self.archives
            .lock()
            .expect("lock poisoned")
            .get(session_id)
            .cloned()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        self.profiles
            .lock()
            .expect("lock poisoned")
            .insert(*profile.session_id(), profile.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .profiles
            .lock()
            .expect("lock poisoned")
            .get(session_id)
            .cloned())
    }

    async fn append_hint(
        &self,
        session_id: &SessionId,
        event: &HintEvent,
    ) -> Result<(), DomainError> {
        self.hints
            .lock()
            .expect("lock poisoned")
            .entry(*session_id)
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn resolve_open_hints(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        outcome: HintOutcome,
        answered_at_ms: u64,
    ) -> Result<u32, DomainError> {
        let mut hints = self.hints.lock().expect("lock poisoned");
        let mut resolved = 0;
        for event in hints.entry(*session_id).or_default() {
            if event.is_open() && event.question_id() == question_id {
                event.resolve_at(outcome, answered_at_ms)?;
                resolved += 1;
            }
        }
        Ok(resolved)
    }

    async fn close_open_hints(
        &self,
        session_id: &SessionId,
        outcome: HintOutcome,
    ) -> Result<u32, DomainError> {
        let mut hints = self.hints.lock().expect("lock poisoned");
        let mut closed = 0;
        for event in hints.entry(*session_id).or_default() {
            if event.is_open() {
                event.resolve_unanswered(outcome)?;
                closed += 1;
            }
        }
        Ok(closed)
    }

    async fn append_timing(
        &self,
        session_id: &SessionId,
        metrics: &TimeMetrics,
    ) -> Result<(), DomainError> {
        self.timings
            .lock()
            .expect("lock poisoned")
            .entry(*session_id)
            .or_default()
            .push(metrics.clone());
        Ok(())
    }

    async fn hints_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<HintEvent>, DomainError> {
        Ok(self
            .hints
            .lock()
            .expect("lock poisoned")
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn timings_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<TimeMetrics>, DomainError> {
        Ok(self
            .timings
            .lock()
            .expect("lock poisoned")
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn archive(
        &self,
        profile: &Profile,
        report: &AssessmentReport,
    ) -> Result<(), DomainError> {
        self.archives
            .lock()
            .expect("lock poisoned")
            .insert(*profile.session_id(), (profile.clone(), report.clone()));
        Ok(())
    }
}

/// Question store stub holding at most one question.
pub(crate) struct MockStore {
    question: Option<Question>,
    last_lookup: Mutex<Option<(Dimension, u8)>>,
}

impl MockStore {
    pub(crate) fn empty() -> Self {
        Self {
            question: None,
            last_lookup: Mutex::new(None),
        }
    }

    pub(crate) fn with_question(question: Question) -> Self {
        Self {
            question: Some(question),
            last_lookup: Mutex::new(None),
        }
    }

    pub(crate) fn last_lookup(&self) -> Option<(Dimension, u8)> {
        *self.last_lookup.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl QuestionStore for MockStore {
    async fn find_by_dimension_and_difficulty(
        &self,
        dimension: Dimension,
        tier: u8,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, StoreError> {
        *self.last_lookup.lock().expect("lock poisoned") = Some((dimension, tier));
        Ok(self
            .question
            .as_ref()
            .filter(|q| !exclude.contains(q.id()))
            .cloned())
    }
}

enum GeneratorMode {
    Succeeding,
    FailingOnce,
    FailingHard,
}

/// Question generator stub producing multiple-choice questions.
pub(crate) struct MockGenerator {
    mode: GeneratorMode,
    failed: AtomicBool,
    calls: AtomicU32,
}

impl MockGenerator {
    pub(crate) fn succeeding() -> Self {
        Self {
            mode: GeneratorMode::Succeeding,
            failed: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    /// Fails the first call with a transient error, then succeeds.
    pub(crate) fn failing_once() -> Self {
        Self {
            mode: GeneratorMode::FailingOnce,
            failed: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    /// Always fails with a non-retryable error.
    pub(crate) fn failing_hard() -> Self {
        Self {
            mode: GeneratorMode::FailingHard,
            failed: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for MockGenerator {
    async fn generate(
        &self,
        dimension: Dimension,
        difficulty: f64,
        _format: QuestionFormat,
        _recent_texts: &[String],
    ) -> Result<Question, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            GeneratorMode::FailingHard => {
                return Err(GeneratorError::Malformed {
                    reason: "no question in payload".to_string(),
                })
            }
            GeneratorMode::FailingOnce => {
                if !self.failed.swap(true, Ordering::SeqCst) {
                    return Err(GeneratorError::Unavailable {
                        reason: "connection refused".to_string(),
                    });
                }
            }
            GeneratorMode::Succeeding => {}
        }
        let id = QuestionId::new();
        Ok(Question::new(
            id,
            vec![dimension],
            scale::bank_tier(difficulty),
            format!("generated question {}", id),
            mc_kind(),
            QuestionSource::Generated,
        )
        .expect("mock question is valid"))
    }
}

/// Evaluator stub returning a fixed verdict or a transient failure.
pub(crate) struct MockEvaluator {
    verdict: Option<Verdict>,
    calls: AtomicU32,
}

impl MockEvaluator {
    pub(crate) fn returning(verdict: Verdict) -> Self {
        Self {
            verdict: Some(verdict),
            calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            verdict: None,
            calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerEvaluator for MockEvaluator {
    async fn evaluate(
        &self,
        _question: &Question,
        _answer: &crate::domain::question::AnswerInput,
    ) -> Result<Evaluation, EvaluatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.verdict {
            Some(verdict) => Ok(Evaluation {
                verdict,
                feedback: "graded by mock".to_string(),
            }),
            None => Err(EvaluatorError::Unavailable {
                reason: "connection refused".to_string(),
            }),
        }
    }
}
