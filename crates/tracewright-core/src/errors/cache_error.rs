//! Script Cache errors (spec.md §4.C4, §7).
//!
//! The core retries a small number of times then degrades by bypassing
//! the cache for that item (spec.md §7 propagation policy) — callers
//! should not treat `CacheError` as fatal to the Work Item.

#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("failed to read cache index at {path}: {message}")]
    IndexRead { path: String, message: String },
    #[error("failed to write cache index at {path}: {message}")]
    IndexWrite { path: String, message: String },
    #[error("failed to lock cache index at {path}: {message}")]
    Lock { path: String, message: String },
    #[error("failed to persist body file {path}: {message}")]
    BodyWrite { path: String, message: String },
    #[error("cache entry {fingerprint} is present in the index but its body file is missing")]
    MissingBody { fingerprint: String },
}
