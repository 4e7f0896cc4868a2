//! Behavior domain - hint and timing telemetry plus its aggregation.

mod analyzer;
mod hint;
mod timing;

pub use analyzer::{BehaviorAnalyzer, BehaviorReport, HelpSeekingStyle, LearningMode};
pub use hint::{HintCategory, HintEvent, HintOutcome};
pub use timing::TimeMetrics;
