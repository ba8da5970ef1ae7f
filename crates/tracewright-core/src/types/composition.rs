//! File Composition Result — the Core API's return value (spec.md §3, §6.1).

use std::collections::BTreeMap;

/// Per-function outcome surfaced to the caller (spec.md §6.1
/// `per_function_statuses`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FunctionStatus {
    Success { cached: bool },
    Failure { reason: String },
}

#[derive(Debug, Clone)]
pub struct FileCompositionResult {
    pub instrumented_source: Vec<u8>,
    pub replaced_count: usize,
    /// Keyed by function name; `BTreeMap` keeps the map deterministic for
    /// snapshot tests and stable `Debug` output.
    pub per_function_statuses: BTreeMap<String, FunctionStatus>,
}
