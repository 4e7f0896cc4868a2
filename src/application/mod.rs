//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports: each handler runs one step of the assessment loop (start,
//! select question, grade answer, record hint, finalize) and owns the
//! single-save-per-turn discipline.

mod error;
pub mod handlers;

pub use error::AssessmentError;
pub use handlers::{
    FinalizeSessionCommand, FinalizeSessionHandler, NextQuestionCommand, NextQuestionHandler,
    NextQuestionResult, RecordHintCommand, RecordHintHandler, StartSessionCommand,
    StartSessionHandler, StartSessionResult, SubmitAnswerCommand, SubmitAnswerHandler, TurnResult,
};
