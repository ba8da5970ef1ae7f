//! On-disk layout (spec.md §6.2, a stable contract):
//!
//! ```text
//! <cache_root>/
//!     index.json
//!     index.json.lock
//!     store/<lang>/<name>_<short>.prog
//!     tests/<lang>/<name>_<short>.tst
//! ```

use std::path::{Path, PathBuf};

use tracewright_core::{Fingerprint, Language};

pub fn index_path(root: &Path) -> PathBuf {
    root.join("index.json")
}

pub fn lock_path(root: &Path) -> PathBuf {
    root.join("index.json.lock")
}

pub fn store_dir(root: &Path, language: Language) -> PathBuf {
    root.join("store").join(language.short_id())
}

pub fn tests_dir(root: &Path, language: Language) -> PathBuf {
    root.join("tests").join(language.short_id())
}

/// `<name>_<short_hash>.<ext>`, with `name` sanitized so arbitrary function
/// names never escape the cache directory or collide with path separators.
pub fn body_file_name(function_name: &str, fingerprint: Fingerprint, ext: &str) -> String {
    format!("{}_{}.{}", sanitize(function_name), fingerprint.short_hex(), ext)
}

fn sanitize(name: &str) -> String {
    let cleaned: String =
        name.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_path_hostile_characters() {
        assert_eq!(sanitize("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize("normal_name"), "normal_name");
    }

    #[test]
    fn empty_name_falls_back_to_anonymous() {
        assert_eq!(sanitize(""), "anonymous");
    }
}
