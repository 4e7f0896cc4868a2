//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `QuestionStore` - Pre-authored question bank lookup
//! - `QuestionGenerator` - On-demand question synthesis via an external provider
//! - `AnswerEvaluator` - Answer grading, local or provider-backed
//! - `ProfileRepository` - Session persistence and the hint/timing event logs

mod answer_evaluator;
mod profile_repository;
mod question_generator;
mod question_store;

pub use answer_evaluator::{AnswerEvaluator, Evaluation, EvaluatorError};
pub use profile_repository::ProfileRepository;
pub use question_generator::{GeneratorError, QuestionGenerator};
pub use question_store::{QuestionStore, StoreError};
