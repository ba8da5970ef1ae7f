//! Per-item error: neither template nor oracle produced a candidate
//! Transformer (spec.md §4.C3, §7).

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("template generator does not support {kind} for {language}")]
    TemplateNotApplicable { kind: String, language: String },

    #[error("oracle generation unavailable: {0}")]
    OracleUnavailable(String),

    #[error("oracle response could not be parsed into a Transformer: {0}")]
    MalformedOracleTransformer(String),

    #[error("oracle call timed out")]
    OracleTimeout,
}
