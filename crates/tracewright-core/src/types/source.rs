//! Source File — immutable once constructed; owned by the caller, borrowed by the core.

use std::path::{Path, PathBuf};

use super::language::Language;

/// A `(language, bytes, path)` tuple. Immutable once accepted (§3 Data Model).
#[derive(Debug, Clone)]
pub struct SourceFile {
    language: Language,
    bytes: Vec<u8>,
    path: PathBuf,
}

impl SourceFile {
    pub fn new(bytes: Vec<u8>, language: Language, path: impl Into<PathBuf>) -> Self {
        Self {
            language,
            bytes,
            path: path.into(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
