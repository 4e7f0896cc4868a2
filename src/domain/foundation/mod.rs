//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Skillscope domain.

mod dimension;
mod errors;
mod ids;
pub mod scale;
mod state_machine;
mod timestamp;

pub use dimension::Dimension;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{LearnerId, QuestionId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
