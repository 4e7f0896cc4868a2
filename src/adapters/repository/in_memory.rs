//! In-memory session repository.
//!
//! Reference implementation of the persistence semantics: a save
//! replaces the whole profile under one lock, so readers never observe a
//! half-updated session. Used by the integration tests and offline
//! demos.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::assessment::{AssessmentReport, Profile};
use crate::domain::behavior::{HintEvent, HintOutcome, TimeMetrics};
use crate::domain::foundation::{DomainError, QuestionId, SessionId};
use crate::ports::ProfileRepository;

#[derive(Default)]
struct SessionRecord {
    hints: Vec<HintEvent>,
    timings: Vec<TimeMetrics>,
}

/// In-memory [`ProfileRepository`] implementation.
///
/// # Panics
/// Methods panic if an internal lock is poisoned.
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<SessionId, Profile>>,
    records: RwLock<HashMap<SessionId, SessionRecord>>,
    archives: RwLock<HashMap<SessionId, (Profile, AssessmentReport)>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            records: RwLock::new(HashMap::new()),
            archives: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the archived profile and report for a finished session.
    pub fn archived(&self, session_id: &SessionId) -> Option<(Profile, AssessmentReport)> {
        self.archives
            .read()
            .expect("lock poisoned")
            .get(session_id)
            .cloned()
    }

    pub fn session_count(&self) -> usize {
        self.profiles.read().expect("lock poisoned").len()
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        self.profiles
            .write()
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
            .read()
            .expect("lock poisoned")
            .get(session_id)
            .cloned())
    }

    async fn append_hint(
        &self,
        session_id: &SessionId,
        event: &HintEvent,
    ) -> Result<(), DomainError> {
        self.records
            .write()
            .expect("lock poisoned")
            .entry(*session_id)
            .or_default()
            .hints
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
        let mut records = self.records.write().expect("lock poisoned");
        let record = records.entry(*session_id).or_default();
        let mut resolved = 0;
        for event in &mut record.hints {
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
        let mut records = self.records.write().expect("lock poisoned");
        let record = records.entry(*session_id).or_default();
        let mut closed = 0;
        for event in &mut record.hints {
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
        self.records
            .write()
            .expect("lock poisoned")
            .entry(*session_id)
            .or_default()
            .timings
            .push(metrics.clone());
        Ok(())
    }

    async fn hints_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<HintEvent>, DomainError> {
        Ok(self
            .records
            .read()
            .expect("lock poisoned")
            .get(session_id)
            .map(|r| r.hints.clone())
            .unwrap_or_default())
    }

    async fn timings_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<TimeMetrics>, DomainError> {
        Ok(self
            .records
            .read()
            .expect("lock poisoned")
            .get(session_id)
            .map(|r| r.timings.clone())
            .unwrap_or_default())
    }

    async fn archive(
        &self,
        profile: &Profile,
        report: &AssessmentReport,
    ) -> Result<(), DomainError> {
        self.archives
            .write()
            .expect("lock poisoned")
            .insert(*profile.session_id(), (profile.clone(), report.clone()));
        Ok(())
    }
}
