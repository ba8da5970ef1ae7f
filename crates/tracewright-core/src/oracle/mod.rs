//! External Analyzer (oracle) interface — spec.md §6.4.
//!
//! An opaque text-in/text-out collaborator. No concrete model-provider
//! transport is implemented here (out of scope per spec.md §1); this is
//! the seam a caller plugs a real oracle into.

use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    #[error("no oracle is configured")]
    Unavailable,
    #[error("oracle call exceeded its timeout")]
    Timeout,
    #[error("oracle transport error: {0}")]
    Transport(String),
}

/// A text prompt → text response collaborator (spec.md §6.4).
pub trait Oracle: Send + Sync {
    /// Send `prompt` and block for at most `timeout`. The response is raw
    /// text; the caller extracts a Transformer body "by convention (either
    /// the full response, or the content of a fenced code block if
    /// present)" per spec.md §6.4.
    fn ask(&self, prompt: &str, timeout: Duration) -> Result<String, OracleError>;

    /// A stable identifier recorded in `CacheEntry::provenance.oracle_model`.
    fn model_id(&self) -> &str;
}

/// The only bundled `Oracle` implementation: always unavailable. Callers
/// without a real oracle still get the full template path; any Work Item
/// that would require a refactor degrades to
/// `Failure(Refactor, OracleUnavailable)` per spec.md §6.4.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubOracle;

impl Oracle for StubOracle {
    fn ask(&self, _prompt: &str, _timeout: Duration) -> Result<String, OracleError> {
        Err(OracleError::Unavailable)
    }

    fn model_id(&self) -> &str {
        "stub/unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_oracle_is_always_unavailable() {
        let oracle = StubOracle;
        let result = oracle.ask("anything", Duration::from_secs(1));
        assert!(matches!(result, Err(OracleError::Unavailable)));
    }
}
