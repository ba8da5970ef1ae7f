//! Validator (spec.md §4.C5): three checks, short-circuiting on the first
//! failing one so the sandboxed behavioral check only runs against
//! candidates that are already syntactically and policy clean.

pub mod behavioral;
pub mod policy;
pub mod syntactic;

use std::time::Duration;

use tracewright_core::{GeneratedTest, InvalidReason, SandboxExecutor, Transformer};

/// `validate(transformer, test, language) -> Valid | Invalid(reasons)` per
/// spec.md §4.C5's contract (`language` is implicit in `transformer`).
pub fn validate(
    executor: &dyn SandboxExecutor,
    transformer: &Transformer,
    test: &GeneratedTest,
    sandbox_timeout: Duration,
) -> Result<(), Vec<InvalidReason>> {
    syntactic::check(transformer).map_err(|r| vec![r])?;

    let policy_reasons = policy::check(transformer);
    if !policy_reasons.is_empty() {
        return Err(policy_reasons);
    }

    behavioral::check(executor, transformer, test, sandbox_timeout).map_err(|r| vec![r])?;

    Ok(())
}
