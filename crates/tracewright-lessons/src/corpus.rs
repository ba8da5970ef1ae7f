//! Lesson Corpus Loader (spec.md §4.C11): `load(language) -> OrderedList<LessonNote>`,
//! `version() -> version_token`. Read-only for the lifetime of a run.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracewright_core::{Language, LessonError};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LessonNote {
    pub id: String,
    pub title: String,
    pub text: String,
}

pub struct LessonCorpus {
    by_language: rustc_hash::FxHashMap<Language, Vec<LessonNote>>,
    version: String,
}

impl LessonCorpus {
    /// An empty corpus, used when `Options.lessons_root` is `None`
    /// (spec.md §6.1).
    pub fn empty() -> Self {
        Self { by_language: rustc_hash::FxHashMap::default(), version: blake3::hash(b"").to_hex().to_string() }
    }

    /// Load a language-keyed directory tree of lesson notes:
    /// `<root>/<lang-short-id>/<id>.md`, one note per file, ordered
    /// lexicographically by filename within each language.
    pub fn load_from(root: &Path) -> Result<Self, LessonError> {
        let mut by_language = rustc_hash::FxHashMap::default();
        let mut version_seed = Vec::new();

        for language in Language::ALL {
            let dir = root.join(language.short_id());
            let mut notes = Vec::new();
            let mut entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_file())
                    .collect::<Vec<_>>(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
                Err(source) => return Err(LessonError::Io { path: dir, source }),
            };
            entries.sort_by_key(|e| e.file_name());

            for entry in entries {
                let path = entry.path();
                let bytes = std::fs::read(&path).map_err(|source| LessonError::Io { path: path.clone(), source })?;
                let text = String::from_utf8(bytes).map_err(|_| LessonError::InvalidEncoding { path: path.clone() })?;

                let id = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned());
                let title = text.lines().next().unwrap_or(&id).trim_start_matches('#').trim().to_string();

                let mtime_ms = entry
                    .metadata()
                    .ok()
                    .and_then(|m| m.modified().ok())
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_millis())
                    .unwrap_or(0);
                version_seed.extend_from_slice(id.as_bytes());
                version_seed.extend_from_slice(&mtime_ms.to_le_bytes());

                notes.push(LessonNote { id, title, text });
            }

            if !notes.is_empty() {
                by_language.insert(language, notes);
            }
        }

        let version = blake3::hash(&version_seed).to_hex().to_string();
        Ok(Self { by_language, version })
    }

    pub fn load(&self, language: Language) -> &[LessonNote] {
        self.by_language.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Convenience wrapper matching `Options.lessons_root: path | none`
/// (spec.md §6.1): `None` yields an empty, stably-versioned corpus.
pub fn load_optional(root: Option<&PathBuf>) -> Result<LessonCorpus, LessonError> {
    match root {
        Some(root) => LessonCorpus::load_from(root),
        None => Ok(LessonCorpus::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_has_no_lessons_for_any_language() {
        let corpus = LessonCorpus::empty();
        for language in Language::ALL {
            assert!(corpus.load(language).is_empty());
        }
    }

    #[test]
    fn loads_lessons_in_lexicographic_filename_order() {
        let dir = tempfile::tempdir().unwrap();
        let py_dir = dir.path().join("py");
        std::fs::create_dir_all(&py_dir).unwrap();
        std::fs::write(py_dir.join("b_second.md"), "# Second\nbody").unwrap();
        std::fs::write(py_dir.join("a_first.md"), "# First\nbody").unwrap();

        let corpus = LessonCorpus::load_from(dir.path()).unwrap();
        let notes = corpus.load(Language::Python);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "a_first");
        assert_eq!(notes[1].id, "b_second");
    }

    #[test]
    fn missing_language_subdirectory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = LessonCorpus::load_from(dir.path()).unwrap();
        assert!(corpus.load(Language::Go).is_empty());
    }

    #[test]
    fn version_is_stable_across_identical_loads() {
        let dir = tempfile::tempdir().unwrap();
        let py_dir = dir.path().join("py");
        std::fs::create_dir_all(&py_dir).unwrap();
        std::fs::write(py_dir.join("note.md"), "# Note\nbody").unwrap();

        let a = LessonCorpus::load_from(dir.path()).unwrap();
        let b = LessonCorpus::load_from(dir.path()).unwrap();
        assert_eq!(a.version(), b.version());
    }
}
