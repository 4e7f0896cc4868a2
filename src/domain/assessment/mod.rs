//! Assessment domain - the adaptive estimation engine.
//!
//! A session holds one [`Profile`] with a [`DimensionState`] per
//! competency dimension. Each answered question runs the
//! [`BoundUpdater`], the [`PhaseClassifier`] recomputes the phase from
//! scratch, the [`QuestionSelector`] picks the next probe, and the
//! [`CompletionGate`] decides when to stop. All of it is pure; the
//! application layer owns I/O and persistence.

mod bound_updater;
mod completion;
mod dimension_state;
mod outcome;
mod phase;
mod profile;
mod report;
mod selector;
mod status;
mod tuning;

pub use bound_updater::BoundUpdater;
pub use completion::{CompletionGate, StopReason};
pub use dimension_state::DimensionState;
pub use outcome::{AnswerOutcome, Verdict};
pub use phase::{Phase, PhaseClassifier};
pub use profile::Profile;
pub use report::{AssessmentReport, DimensionResult};
pub use selector::{ProbeSpec, QuestionSelector};
pub use status::AssessmentStatus;
pub use tuning::Tuning;
