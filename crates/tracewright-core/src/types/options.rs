//! Options — explicit config record threaded into `instrument_file` and
//! down to every worker (spec.md §9 Design Notes: "replace global
//! configuration via ambient state with an explicit Options record").
//!
//! Loading these from CLI flags / `.env` files is out of scope (spec.md
//! §1); the record and its defaults are not.

use std::path::PathBuf;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    pub max_workers: usize,
    pub sandbox_timeout_ms: u64,
    pub oracle_timeout_ms: u64,
    pub max_refactor_attempts: u32,
    pub cache_root: PathBuf,
    pub lessons_root: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_workers: 12,
            sandbox_timeout_ms: 10_000,
            oracle_timeout_ms: 120_000,
            max_refactor_attempts: 3,
            cache_root: PathBuf::from(".tracewright/cache"),
            lessons_root: None,
        }
    }
}

impl Options {
    pub fn effective_max_workers(&self) -> usize {
        self.max_workers.max(1)
    }
}
