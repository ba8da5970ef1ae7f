//! Lesson Corpus Loader errors (spec.md §4.C11). Not part of the §7
//! Work-Item failure taxonomy — corpus loading happens once per run,
//! before any Work Item exists.

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("failed to read lessons directory '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lesson file '{path}' is not valid UTF-8")]
    InvalidEncoding { path: std::path::PathBuf },
}
