//! Sandboxed Executor seam — spec.md §4.C7.
//!
//! The interpreter that actually spawns the isolated child process lives
//! in `tracewright-sandbox`; this trait is the contract both that crate
//! and `tracewright-validate`'s behavioral check build against, so the
//! Validator never depends on the Sandbox crate directly.

use std::time::Duration;

use crate::errors::ExecutionError;
use crate::types::Transformer;

/// `{exit_code, stdout_bytes, stderr_bytes, wall_duration, timed_out}`
/// per spec.md §4.C7's contract.
#[derive(Debug, Clone)]
pub struct SandboxOutcome {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub wall_duration: Duration,
    pub timed_out: bool,
}

impl SandboxOutcome {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }

    /// Last 4KB of stderr, the amount spec.md §7's `Execution` failure
    /// reason carries.
    pub fn stderr_tail(&self) -> String {
        let text = String::from_utf8_lossy(&self.stderr);
        let tail_start = text.len().saturating_sub(4096);
        let mut start = tail_start;
        while start < text.len() && !text.is_char_boundary(start) {
            start += 1;
        }
        text[start..].to_string()
    }
}

/// `execute(transformer, stdin_bytes, wall_timeout) -> SandboxOutcome`.
/// Implementors own the child-process lifecycle (fresh cwd, scrubbed
/// environment, wall-clock enforcement); callers never see a process handle.
pub trait SandboxExecutor: Send + Sync {
    fn execute(
        &self,
        transformer: &Transformer,
        stdin: &[u8],
        wall_timeout: Duration,
    ) -> Result<SandboxOutcome, ExecutionError>;
}
