//! HTTP provider adapter for question generation and answer grading.
//!
//! Talks to an external text-generation service over a small JSON API
//! and maps its failure modes onto the port error taxonomies. The
//! provider never hands a malformed question to the domain: whatever
//! comes back over the wire goes through the `Question` constructor and
//! a parse failure is reported as `Malformed`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::assessment::Verdict;
use crate::domain::foundation::{scale, Dimension, QuestionId};
use crate::domain::question::{AnswerInput, Question, QuestionFormat, QuestionKind, QuestionSource};
use crate::ports::{
    AnswerEvaluator, Evaluation, EvaluatorError, GeneratorError, QuestionGenerator,
};

/// Fallback retry delay when a 429 carries no Retry-After header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the HTTP provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to request.
    pub model: String,
    /// Base URL of the provider API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "tutor-large".to_string(),
            base_url: "https://api.tutor.example".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP-backed implementation of both AI-facing ports.
pub struct HttpProvider {
    config: ProviderConfig,
    client: Client,
}

impl HttpProvider {
    /// Creates a provider with the given configuration.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be constructed.
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!("{}/v1/questions/generate", self.config.base_url)
    }

    fn evaluate_url(&self) -> String {
        format!("{}/v1/answers/evaluate", self.config.base_url)
    }

    async fn post<T: Serialize>(&self, url: String, body: &T) -> Result<Response, reqwest::Error> {
        self.client
            .post(url)
            .bearer_auth(self.config.api_key())
            .json(body)
            .send()
            .await
    }
}

fn retry_after_secs(response: &Response) -> u32 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Classifies a transport-level failure.
fn transport_failure(err: reqwest::Error, timeout: Duration) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else {
        TransportFailure::Unavailable {
            reason: err.to_string(),
        }
    }
}

enum TransportFailure {
    Timeout { timeout_secs: u64 },
    Unavailable { reason: String },
    RateLimited { retry_after_secs: u32 },
}

/// Maps a non-success status onto a transport failure.
fn status_failure(response: &Response) -> Option<TransportFailure> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(TransportFailure::RateLimited {
            retry_after_secs: retry_after_secs(response),
        });
    }
    if !status.is_success() {
        return Some(TransportFailure::Unavailable {
            reason: format!("provider returned {}", status),
        });
    }
    None
}

impl From<TransportFailure> for GeneratorError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Timeout { timeout_secs } => GeneratorError::Timeout { timeout_secs },
            TransportFailure::Unavailable { reason } => GeneratorError::Unavailable { reason },
            TransportFailure::RateLimited { retry_after_secs } => {
                GeneratorError::RateLimited { retry_after_secs }
            }
        }
    }
}

impl From<TransportFailure> for EvaluatorError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Timeout { timeout_secs } => EvaluatorError::Timeout { timeout_secs },
            TransportFailure::Unavailable { reason } => EvaluatorError::Unavailable { reason },
            TransportFailure::RateLimited { retry_after_secs } => {
                EvaluatorError::RateLimited { retry_after_secs }
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    dimension: &'a str,
    difficulty: f64,
    format: QuestionFormat,
    avoid_texts: &'a [String],
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
    #[serde(flatten)]
    kind: QuestionKind,
}

#[derive(Serialize)]
struct EvaluateRequest<'a> {
    model: &'a str,
    question_text: &'a str,
    question: &'a QuestionKind,
    answer: &'a AnswerInput,
}

#[derive(Deserialize)]
struct EvaluateResponse {
    verdict: String,
    #[serde(default)]
    feedback: String,
}

fn parse_verdict(raw: &str) -> Option<Verdict> {
    match raw {
        "correct" => Some(Verdict::Correct),
        "partial" => Some(Verdict::Partial),
        "wrong" => Some(Verdict::Wrong),
        _ => None,
    }
}

#[async_trait]
impl QuestionGenerator for HttpProvider {
    async fn generate(
        &self,
        dimension: Dimension,
        difficulty: f64,
        format: QuestionFormat,
        recent_texts: &[String],
    ) -> Result<Question, GeneratorError> {
        let request = GenerateRequest {
            model: &self.config.model,
            dimension: dimension.label(),
            difficulty,
            format,
            avoid_texts: recent_texts,
        };
        let response = self
            .post(self.generate_url(), &request)
            .await
            .map_err(|e| GeneratorError::from(transport_failure(e, self.config.timeout)))?;
        if let Some(failure) = status_failure(&response) {
            return Err(failure.into());
        }

        let payload: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| GeneratorError::Malformed {
                    reason: format!("undecodable generation payload: {}", e),
                })?;
        if payload.kind.format() != format {
            return Err(GeneratorError::Malformed {
                reason: format!(
                    "requested a {:?} question, got {:?}",
                    format,
                    payload.kind.format()
                ),
            });
        }

        Question::new(
            QuestionId::new(),
            vec![dimension],
            scale::bank_tier(difficulty),
            payload.text,
            payload.kind,
            QuestionSource::Generated,
        )
        .map_err(|e| GeneratorError::Malformed {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl AnswerEvaluator for HttpProvider {
    async fn evaluate(
        &self,
        question: &Question,
        answer: &AnswerInput,
    ) -> Result<Evaluation, EvaluatorError> {
        let request = EvaluateRequest {
            model: &self.config.model,
            question_text: question.text(),
            question: question.kind(),
            answer,
        };
        let response = self
            .post(self.evaluate_url(), &request)
            .await
            .map_err(|e| EvaluatorError::from(transport_failure(e, self.config.timeout)))?;
        if let Some(failure) = status_failure(&response) {
            return Err(failure.into());
        }

        let payload: EvaluateResponse =
            response
                .json()
                .await
                .map_err(|e| EvaluatorError::Malformed {
                    reason: format!("undecodable evaluation payload: {}", e),
                })?;
        let verdict = parse_verdict(&payload.verdict).ok_or_else(|| EvaluatorError::Malformed {
            reason: format!("unknown verdict {:?}", payload.verdict),
        })?;

        Ok(Evaluation {
            verdict,
            feedback: payload.feedback,
        })
    }
}
