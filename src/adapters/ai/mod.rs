//! AI adapters - provider-backed generation/grading plus a local stand-in.

mod provider;
mod scripted;

pub use provider::{HttpProvider, ProviderConfig};
pub use scripted::ScriptedEvaluator;
