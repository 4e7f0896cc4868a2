//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `bank` - Question bank implementations
//! - `ai` - Provider-backed generation/grading and a scripted local evaluator
//! - `repository` - In-memory session persistence
//! - `postgres` - PostgreSQL session persistence

pub mod ai;
pub mod bank;
pub mod postgres;
pub mod repository;

pub use ai::{HttpProvider, ProviderConfig, ScriptedEvaluator};
pub use bank::InMemoryQuestionBank;
pub use postgres::PgProfileRepository;
pub use repository::InMemoryProfileRepository;
