//! Cache Entry — the Script Cache's unit of storage (spec.md §3, §6.2).

use super::language::Language;
use super::transformer::{GeneratedTest, Provenance, Transformer};

/// 128-bit content-addressed key. Stored as a fixed byte array so it can be
/// `Copy`d cheaply through the dispatcher; hex-encoded only at filesystem
/// and index-key boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub [u8; 16]);

impl Fingerprint {
    pub fn to_hex(self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First 8 hex characters — permissible for filenames per spec.md §4.C10.
    pub fn short_hex(self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheEntry {
    pub fingerprint_hex: String,
    pub language: Language,
    pub function_name: String,
    pub provenance: Provenance,
    pub created_at_unix_ms: u64,
    pub last_used_at_unix_ms: u64,
    pub validation_status: ValidationStatus,
    pub hit_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ValidationStatus {
    Valid,
}

/// An in-memory bundle of a cache entry and its bodies, used by `lookup`
/// and `store` before the metadata-only `CacheEntry` is persisted to
/// `index.json` (spec.md §6.2).
#[derive(Debug, Clone)]
pub struct CacheBodies {
    pub transformer: Transformer,
    pub test: GeneratedTest,
}
