//! Process-level Sandboxed Executor (spec.md §4.C7). Re-execs the current
//! binary with a hidden `__run_splice__` marker so the interpreter runs
//! as a genuinely isolated OS process without requiring any
//! python/node/go runtime on the host.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracewright_core::{ExecutionError, SandboxExecutor, SandboxOutcome, Transformer};
use wait_timeout::ChildExt;

pub const SPLICE_MARKER: &str = "__run_splice__";
const SANDBOX_ENV_VAR: &str = "TRACEWRIGHT_SANDBOX";

pub struct ProcessSandboxExecutor {
    current_exe: std::path::PathBuf,
}

impl ProcessSandboxExecutor {
    pub fn new() -> Result<Self, ExecutionError> {
        let current_exe = std::env::current_exe().map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        Ok(Self { current_exe })
    }
}

impl Default for ProcessSandboxExecutor {
    fn default() -> Self {
        Self::new().expect("failed to resolve current executable path")
    }
}

impl SandboxExecutor for ProcessSandboxExecutor {
    fn execute(&self, transformer: &Transformer, stdin: &[u8], wall_timeout: Duration) -> Result<SandboxOutcome, ExecutionError> {
        let cwd = tempfile::tempdir().map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;

        let transformer_path = cwd.path().join("transformer.json");
        let input_path = cwd.path().join("input.bytes");
        let transformer_json = serde_json::to_vec(transformer).map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        std::fs::write(&transformer_path, &transformer_json).map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        std::fs::write(&input_path, stdin).map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;

        let mut child = Command::new(&self.current_exe)
            .arg(SPLICE_MARKER)
            .arg(&transformer_path)
            .arg(&input_path)
            .current_dir(cwd.path())
            .env_clear()
            .env(SANDBOX_ENV_VAR, "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;

        let start = Instant::now();
        let status = child.wait_timeout(wall_timeout).map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;

        let (exit_code, timed_out) = match status {
            Some(status) => (status.code().unwrap_or(-1), false),
            None => {
                let _ = child.kill();
                let _ = child.wait();
                (-1, true)
            }
        };
        let wall_duration = start.elapsed();

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        if let Some(mut out) = child.stdout.take() {
            use std::io::Read;
            let _ = out.read_to_end(&mut stdout);
        }
        if let Some(mut err) = child.stderr.take() {
            use std::io::Read;
            let _ = err.read_to_end(&mut stderr);
        }

        Ok(SandboxOutcome { exit_code, stdout, stderr, wall_duration, timed_out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_marker_is_a_stable_constant() {
        assert_eq!(SPLICE_MARKER, "__run_splice__");
    }
}
