//! The error taxonomy from spec.md §7, centralized the way `drift-core`
//! centralizes `StorageError`/`ContextError` for every downstream crate.

pub mod cache_error;
pub mod cancelled_error;
pub mod generation_error;
pub mod lesson_error;
pub mod parse_error;
pub mod sandbox_error;
pub mod validation_error;

pub use cache_error::CacheError;
pub use cancelled_error::CancelledError;
pub use generation_error::GenerationError;
pub use lesson_error::LessonError;
pub use parse_error::ParseError;
pub use sandbox_error::{ExecutionError, TimeoutError};
pub use validation_error::{InvalidReason, RefactorExhausted, ValidationError};
