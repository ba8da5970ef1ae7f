//! Validator / Refactor Loop errors (spec.md §4.C5, §4.C6, §7).

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
    #[error("splice program failed to deserialize: {0}")]
    Syntactic(String),
    #[error("policy violation: {0}")]
    Policy(String),
    #[error("behavioral check failed: {0}")]
    Behavioral(String),
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("refactor loop exhausted after {attempts} attempt(s): {}", .reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct RefactorExhausted {
    pub attempts: u32,
    pub reasons: Vec<InvalidReason>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Exhausted(#[from] RefactorExhausted),
}
