//! # tracewright-lessons
//!
//! Lesson Corpus Loader (spec.md §4.C11) and the oracle prompt builder used
//! by the Transformer Generator's oracle path (§4.C3) and the Refactor Loop
//! (§4.C6). Grounded on `drift-context`'s token-budgeted context assembly.

pub mod corpus;
pub mod prompt;
pub mod token_budget;
pub mod token_counter;

pub use corpus::{load_optional, LessonCorpus, LessonNote};
pub use prompt::PromptBuilder;
