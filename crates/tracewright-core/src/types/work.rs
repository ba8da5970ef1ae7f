//! Work Item / Work Result — the unit the Parallel Dispatcher schedules.

use std::time::Duration;

use super::cache_entry::Fingerprint;
use super::function::FunctionRecord;
use super::probe::ProbePlan;

/// `(function_record, probe_plan, fingerprint, original_function_bytes)`
/// per spec.md §3. Owned by the Parallel Dispatcher for its duration.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub function: FunctionRecord,
    pub plan: ProbePlan,
    pub fingerprint: Fingerprint,
    pub original_bytes: Vec<u8>,
}

/// Why a Work Item failed. Never aborts the batch (spec.md §3, §7).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FailureReason {
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("validation exhausted: {0}")]
    Refactor(String),
    #[error("sandbox execution timed out")]
    Timeout,
    #[error("sandbox execution failed: {0}")]
    Execution(String),
    #[error("transformer produced non-UTF-8 output")]
    Encoding,
    #[error("cache error: {0}")]
    Cache(String),
    #[error("cancelled")]
    Cancelled,
}

/// The per-item outcome (spec.md §3).
#[derive(Debug, Clone)]
pub enum WorkResult {
    Success {
        instrumented_text: Vec<u8>,
        cached: bool,
        transformer_duration: Duration,
    },
    Failure(FailureReason),
}

impl WorkResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
