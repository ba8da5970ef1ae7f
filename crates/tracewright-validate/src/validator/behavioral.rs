//! Behavioral check (spec.md §4.C5, check 3): run the Generated Test under
//! the Sandbox and assert the four properties from §4.C5(c)/(d).

use std::time::Duration;

use tracewright_core::{GeneratedTest, InvalidReason, SandboxExecutor, Transformer};

pub fn check(
    executor: &dyn SandboxExecutor,
    transformer: &Transformer,
    test: &GeneratedTest,
    timeout: Duration,
) -> Result<(), InvalidReason> {
    let first = executor
        .execute(transformer, &test.synthetic_input, timeout)
        .map_err(|e| InvalidReason::Behavioral(format!("sandbox execution failed: {e}")))?;

    if first.timed_out {
        return Err(InvalidReason::Behavioral("sandbox execution timed out".into()));
    }
    if first.exit_code != 0 {
        return Err(InvalidReason::Behavioral(format!(
            "transformer exited with status {}: {}",
            first.exit_code,
            first.stderr_tail()
        )));
    }

    let output = String::from_utf8(first.stdout.clone())
        .map_err(|_| InvalidReason::Behavioral("transformer produced non-UTF-8 output".into()))?;

    for probe_text in &test.expected_probe_texts {
        let occurrences = output.matches(probe_text.as_str()).count();
        if occurrences != 1 {
            return Err(InvalidReason::Behavioral(format!(
                "expected probe text to appear exactly once, found {occurrences}: {probe_text:?}"
            )));
        }
    }

    let mut cursor = 0usize;
    for token in &test.expected_token_sequence {
        match output[cursor..].find(token.as_str()) {
            Some(offset) => cursor += offset + token.len(),
            None => {
                return Err(InvalidReason::Behavioral(format!(
                    "original token {token:?} missing or reordered in instrumented output"
                )));
            }
        }
    }

    let second = executor
        .execute(transformer, &test.synthetic_input, timeout)
        .map_err(|e| InvalidReason::Behavioral(format!("sandbox execution failed on rerun: {e}")))?;
    if second.timed_out || second.exit_code != 0 {
        return Err(InvalidReason::Behavioral("rerun did not complete cleanly".into()));
    }
    if second.stdout != first.stdout {
        return Err(InvalidReason::Behavioral("transformer output is not deterministic across runs".into()));
    }

    Ok(())
}
