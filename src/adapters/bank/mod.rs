//! Question bank adapters.

mod in_memory;

pub use in_memory::InMemoryQuestionBank;
