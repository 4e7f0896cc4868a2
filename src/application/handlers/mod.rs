//! Handlers orchestrating one assessment turn each.

mod finalize_session;
mod next_question;
mod record_hint;
mod start_session;
mod submit_answer;

#[cfg(test)]
pub(crate) mod test_support;

pub use finalize_session::{FinalizeSessionCommand, FinalizeSessionHandler};
pub use next_question::{NextQuestionCommand, NextQuestionHandler, NextQuestionResult};
pub use record_hint::{RecordHintCommand, RecordHintHandler};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, TurnResult};
