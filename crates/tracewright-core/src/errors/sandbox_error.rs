//! Sandboxed Executor errors (spec.md §4.C7, §7).

#[derive(Debug, Clone, thiserror::Error)]
pub enum TimeoutError {
    #[error("sandbox execution exceeded its {limit_ms}ms wall-clock timeout")]
    Sandbox { limit_ms: u64 },
    #[error("oracle call exceeded its {limit_ms}ms timeout")]
    Oracle { limit_ms: u64 },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionError {
    #[error("transformer exited with status {exit_code}: {stderr_tail}")]
    NonZeroExit { exit_code: i32, stderr_tail: String },
    #[error("transformer could not be spawned: {0}")]
    SpawnFailed(String),
    #[error("transformer produced non-UTF-8 stdout")]
    Encoding,
}
