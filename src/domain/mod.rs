//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `question` - Question entity, formats, and answer inputs
//! - `assessment` - Profile aggregate and the adaptive estimation engine
//! - `behavior` - Hint/timing telemetry and its end-of-session analysis

pub mod assessment;
pub mod behavior;
pub mod foundation;
pub mod question;
