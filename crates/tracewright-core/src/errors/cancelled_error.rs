//! Cancellation (spec.md §5, §7).

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("operation was cancelled")]
pub struct CancelledError;
