//! Function Record — derived from a Source File by the analyzer.

/// Opaque per-run identifier for a `FunctionRecord`, stable within one
/// `analyze()` call. Used to express the nested-function parent link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct FunctionId(pub u32);

/// A single function (or method) definition discovered in a source file.
///
/// Invariant: `[start_offset, end_offset)` spans the entire function
/// definition including its declaration header (spec.md §3).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionRecord {
    pub id: FunctionId,
    pub name: String,
    pub signature_text: String,
    pub param_names: Vec<String>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: u32,
    pub end_line: u32,
    pub indent_prefix: String,
    /// `source[start_offset..end_offset]`: the function's own bytes, header
    /// included. This is the "original function bytes" a Work Item carries,
    /// a Transformer is invoked against, and a Probe Plan's `line`/`column`
    /// fields are relative to (line 1 is the line `start_offset` falls on).
    pub span_bytes: Vec<u8>,
    /// `Some(parent)` when this function is lexically nested inside another
    /// function record from the same analysis. The outer record's span
    /// still covers the inner one; the outer Transformer is responsible for
    /// the inner sites (spec.md §4.C1 nested-function policy).
    pub nested_in: Option<FunctionId>,
}

impl FunctionRecord {
    /// Byte length of the function's full span (header through closing body).
    pub fn span_len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// True if this record is not nested inside any other in the same file.
    pub fn is_top_level(&self) -> bool {
        self.nested_in.is_none()
    }
}
