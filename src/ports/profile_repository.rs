//! ProfileRepository port for session persistence.
//!
//! One aggregate per session: the profile plus its hint and timing event
//! logs. `save` must be atomic per session so a half-updated profile is
//! never visible, and a completed session is archived together with its
//! final report.

use async_trait::async_trait;

use crate::domain::assessment::{AssessmentReport, Profile};
use crate::domain::behavior::{HintEvent, HintOutcome, TimeMetrics};
use crate::domain::foundation::{DomainError, QuestionId, SessionId};

/// Repository for assessment sessions and their event logs.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts or fully replaces the profile, atomically per session.
    async fn save(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Loads the profile for a session, if it exists.
    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Option<Profile>, DomainError>;

    /// Appends one hint event to the session's log.
    async fn append_hint(
        &self,
        session_id: &SessionId,
        event: &HintEvent,
    ) -> Result<(), DomainError>;

    /// Back-fills the outcome of every still-open hint on the given
    /// question. `answered_at_ms` is milliseconds into the question at
    /// answer time; implementations derive each event's time-to-answer
    /// from it. Returns the number of events resolved.
    async fn resolve_open_hints(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        outcome: HintOutcome,
        answered_at_ms: u64,
    ) -> Result<u32, DomainError>;

    /// Closes every still-open hint in the session, regardless of
    /// question, without recording a time-to-answer. Used at session end
    /// for hints whose question was never answered.
    async fn close_open_hints(
        &self,
        session_id: &SessionId,
        outcome: HintOutcome,
    ) -> Result<u32, DomainError>;

    /// Appends one timing record to the session's log.
    async fn append_timing(
        &self,
        session_id: &SessionId,
        metrics: &TimeMetrics,
    ) -> Result<(), DomainError>;

    /// All hint events of the session, oldest first.
    async fn hints_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<HintEvent>, DomainError>;

    /// All timing records of the session, oldest first.
    async fn timings_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<TimeMetrics>, DomainError>;

    /// Stores the frozen profile together with its final report. After
    /// this the session is read-only.
    async fn archive(
        &self,
        profile: &Profile,
        report: &AssessmentReport,
    ) -> Result<(), DomainError>;
}
