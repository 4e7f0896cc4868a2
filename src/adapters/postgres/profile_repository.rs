//! PostgreSQL implementation of ProfileRepository.
//!
//! The profile is stored as one JSONB row per session and replaced with
//! a single upsert, which gives the atomic read-modify-write the engine
//! requires without row-level bookkeeping of every bound. Hint and
//! timing events live in append-only tables keyed by session.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::assessment::{AssessmentReport, Profile};
use crate::domain::behavior::{HintCategory, HintEvent, HintOutcome, TimeMetrics};
use crate::domain::foundation::{
    DomainError, ErrorCode, QuestionId, SessionId, Timestamp,
};
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Creates a new PgProfileRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

fn encode_json<T: serde::Serialize>(context: &str, value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| db_error(context, e))
}

fn hint_outcome_to_str(outcome: HintOutcome) -> &'static str {
    outcome.label()
}

fn hint_outcome_from_str(raw: &str) -> Result<HintOutcome, DomainError> {
    match raw {
        "answered_correctly" => Ok(HintOutcome::AnsweredCorrectly),
        "answered_wrong" => Ok(HintOutcome::AnsweredWrong),
        "asked_another_hint" => Ok(HintOutcome::AskedAnotherHint),
        "still_working" => Ok(HintOutcome::StillWorking),
        other => Err(db_error(
            "Unknown hint outcome in storage",
            format!("{:?}", other),
        )),
    }
}

fn hint_category_from_str(raw: &str) -> Result<HintCategory, DomainError> {
    HintCategory::ALL
        .into_iter()
        .find(|c| c.label() == raw)
        .ok_or_else(|| db_error("Unknown hint category in storage", format!("{:?}", raw)))
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        let body = encode_json("Failed to encode profile", profile)?;
        sqlx::query(
            r#"
            INSERT INTO assessment_profiles (session_id, learner_id, status, body, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_id) DO UPDATE SET
                status = EXCLUDED.status,
                body = EXCLUDED.body,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.session_id().as_uuid())
        .bind(profile.learner_id().as_str())
        .bind(profile.status().to_string())
        .bind(body)
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save profile", e))?;
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Profile>, DomainError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT body FROM assessment_profiles WHERE session_id = $1")
                .bind(session_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to load profile", e))?;
        row.map(|(body,)| {
            serde_json::from_value(body).map_err(|e| db_error("Corrupt profile row", e))
        })
        .transpose()
    }

    async fn append_hint(
        &self,
        session_id: &SessionId,
        event: &HintEvent,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO hint_events (
                session_id, question_id, category, time_into_question_ms,
                outcome, time_to_answer_ms, requested_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(event.question_id().as_uuid())
        .bind(event.category().label())
        .bind(event.time_into_question_ms() as i64)
        .bind(event.outcome().map(hint_outcome_to_str))
        .bind(event.time_to_answer_ms().map(|t| t as i64))
        .bind(event.requested_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append hint event", e))?;
        Ok(())
    }

    async fn resolve_open_hints(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        outcome: HintOutcome,
        answered_at_ms: u64,
    ) -> Result<u32, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE hint_events SET
                outcome = $3,
                time_to_answer_ms = GREATEST($4 - time_into_question_ms, 0)
            WHERE session_id = $1 AND question_id = $2 AND outcome IS NULL
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(question_id.as_uuid())
        .bind(hint_outcome_to_str(outcome))
        .bind(answered_at_ms as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to resolve hint events", e))?;
        Ok(result.rows_affected() as u32)
    }

    async fn close_open_hints(
        &self,
        session_id: &SessionId,
        outcome: HintOutcome,
    ) -> Result<u32, DomainError> {
        let result = sqlx::query(
            "UPDATE hint_events SET outcome = $2 WHERE session_id = $1 AND outcome IS NULL",
        )
        .bind(session_id.as_uuid())
        .bind(hint_outcome_to_str(outcome))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to close hint events", e))?;
        Ok(result.rows_affected() as u32)
    }

    async fn append_timing(
        &self,
        session_id: &SessionId,
        metrics: &TimeMetrics,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO time_metrics (
                session_id, question_id, total_time_ms,
                time_to_first_action_ms, time_to_first_hint_ms
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(metrics.question_id().as_uuid())
        .bind(metrics.total_time_ms() as i64)
        .bind(metrics.time_to_first_action_ms().map(|t| t as i64))
        .bind(metrics.time_to_first_hint_ms().map(|t| t as i64))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append time metrics", e))?;
        Ok(())
    }

    async fn hints_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<HintEvent>, DomainError> {
        let rows: Vec<(
            uuid::Uuid,
            String,
            i64,
            Option<String>,
            Option<i64>,
            chrono::DateTime<chrono::Utc>,
        )> = sqlx::query_as(
            r#"
            SELECT question_id, category, time_into_question_ms,
                   outcome, time_to_answer_ms, requested_at
            FROM hint_events
            WHERE session_id = $1
            ORDER BY id
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load hint events", e))?;

        rows.into_iter()
            .map(
                |(question_id, category, time_into, outcome, time_to_answer, requested_at)| {
                    Ok(HintEvent::reconstitute(
                        QuestionId::from_uuid(question_id),
                        hint_category_from_str(&category)?,
                        time_into as u64,
                        outcome.as_deref().map(hint_outcome_from_str).transpose()?,
                        time_to_answer.map(|t| t as u64),
                        Timestamp::from_datetime(requested_at),
                    ))
                },
            )
            .collect()
    }

    async fn timings_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<TimeMetrics>, DomainError> {
        let rows: Vec<(uuid::Uuid, i64, Option<i64>, Option<i64>)> = sqlx::query_as(
            r#"
            SELECT question_id, total_time_ms, time_to_first_action_ms, time_to_first_hint_ms
            FROM time_metrics
            WHERE session_id = $1
            ORDER BY id
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load time metrics", e))?;

        rows.into_iter()
            .map(|(question_id, total, first_action, first_hint)| {
                TimeMetrics::new(
                    QuestionId::from_uuid(question_id),
                    total as u64,
                    first_action.map(|t| t as u64),
                    first_hint.map(|t| t as u64),
                )
                .map_err(DomainError::from)
            })
            .collect()
    }

    async fn archive(
        &self,
        profile: &Profile,
        report: &AssessmentReport,
    ) -> Result<(), DomainError> {
        let profile_body = encode_json("Failed to encode profile", profile)?;
        let report_body = encode_json("Failed to encode report", report)?;

        // The frozen profile and its report land together or not at all.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;
        sqlx::query(
            r#"
            INSERT INTO assessment_archives (session_id, learner_id, profile, report, archived_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(profile.session_id().as_uuid())
        .bind(profile.learner_id().as_str())
        .bind(profile_body)
        .bind(report_body)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to archive session", e))?;
        sqlx::query("UPDATE assessment_profiles SET status = $2 WHERE session_id = $1")
            .bind(profile.session_id().as_uuid())
            .bind(profile.status().to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to freeze profile row", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit archive", e))?;
        Ok(())
    }
}
