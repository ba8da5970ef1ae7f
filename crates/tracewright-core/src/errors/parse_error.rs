//! Fatal-for-the-file errors from the Source Analyzer (spec.md §4.C1, §7).

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("no analyzer available for file extension '.{extension}'")]
    UnsupportedLanguage { extension: String },

    #[error("source could not be parsed: {message}")]
    SyntaxError { message: String },

    #[error("structured analyzer failed and no oracle analyzer is configured: {message}")]
    OracleUnavailable { message: String },

    #[error("oracle analyzer returned a malformed analysis result: {message}")]
    MalformedOracleResponse { message: String },

    /// Setup failures that happen once per `instrument_file` call, before
    /// any function is dispatched, are folded into this taxonomy rather
    /// than given a separate top-level error type (spec.md §6.1 pins
    /// `instrument_file`'s return type to `Result<_, ParseError>`).
    #[error("script cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("lesson corpus unavailable: {0}")]
    LessonsUnavailable(String),

    #[error("sandboxed executor unavailable: {0}")]
    SandboxUnavailable(String),
}
