//! Probe Site / Probe Plan — tagged-variant re-architecture of the
//! original loosely-typed "event dict" representation (spec.md §9, Design
//! Notes: "re-architect as a tagged variant where each kind is a distinct
//! case with exactly the fields it needs").

use std::cmp::Ordering;

/// Where an insertion lands relative to its anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    Before,
    After,
}

/// One tagged probe-site kind, carrying exactly the payload that kind needs.
///
/// `payload` in spec.md §3 is opaque to the core; here it is a concrete,
/// pattern-matchable case per the Design Notes re-architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProbeKind {
    FuncEntry { param_names: Vec<String> },
    FuncExit,
    LoopEntry { loop_var: Option<String> },
    LoopExit,
    CondEntry { branch_id: String, condition_text: String },
    CondExit { branch_id: String },
    VarChange { name: String },
    ExcEnter,
    ExcCaught { exception_var: Option<String>, exception_type: Option<String> },
    ExcExit,
    ArrayCreate { name: String },
    ArrayModify { name: String, operation: String },
    ArrayAccess { name: String },
    CallTrace { receiver: String, method: String },
    ReturnValue { expr_text: Option<String> },
}

impl ProbeKind {
    /// Stable lexicographic tag used for tie-breaking in `ProbePlan` ordering
    /// (spec.md §4.C2: "Ties broken by kind lexicographic order").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ArrayAccess { .. } => "array_access",
            Self::ArrayCreate { .. } => "array_create",
            Self::ArrayModify { .. } => "array_modify",
            Self::CallTrace { .. } => "call_trace",
            Self::CondEntry { .. } => "cond_entry",
            Self::CondExit { .. } => "cond_exit",
            Self::ExcCaught { .. } => "exc_caught",
            Self::ExcEnter => "exc_enter",
            Self::ExcExit => "exc_exit",
            Self::FuncEntry { .. } => "func_entry",
            Self::FuncExit => "func_exit",
            Self::LoopEntry { .. } => "loop_entry",
            Self::LoopExit => "loop_exit",
            Self::ReturnValue { .. } => "return_value",
            Self::VarChange { .. } => "var_change",
        }
    }
}

/// A single tagged insertion, keyed by line/column. `line`/`column` are
/// 1-indexed and relative to the owning `FunctionRecord`'s own
/// `span_bytes` (spec.md §3: "1-indexed, relative to original file" — here
/// "file" means the function's own text, which is what a Transformer and
/// the sandboxed interpreter actually receive; the Probe Plan Builder is
/// what re-bases tree-sitter's file-absolute coordinates into this space).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ProbeSite {
    pub kind: ProbeKind,
    pub line: u32,
    pub column: u32,
    pub anchor: Anchor,
    /// Pairs related sites (e.g. a `loop_entry`/`loop_exit` for the same
    /// loop, or a `cond_entry`/`cond_exit` for the same branch) so a
    /// Transformer can thread per-call state through the runtime without
    /// the core knowing what that state is (spec.md §4.C2: "correlation_token").
    pub correlation_token: String,
}

impl ProbeSite {
    /// Sort key matching spec.md §3/§4.C2: `(line desc, column desc, anchor
    /// order, kind tag)`, with `after` ordered after `before` at the same
    /// column so that applying insertions in this order back-to-front never
    /// invalidates a not-yet-applied offset.
    fn sort_key(&self) -> (std::cmp::Reverse<u32>, std::cmp::Reverse<u32>, u8, &'static str) {
        let anchor_order = match self.anchor {
            Anchor::Before => 0u8,
            Anchor::After => 1u8,
        };
        (
            std::cmp::Reverse(self.line),
            std::cmp::Reverse(self.column),
            anchor_order,
            self.kind.tag(),
        )
    }
}

impl PartialOrd for ProbeSite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProbeSite {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// The ordered, canonical set of Probe Sites for one function.
///
/// Construction always sorts and is therefore stable regardless of the
/// order sites were discovered in (spec.md I: "Ordering is stable").
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProbePlan {
    sites: Vec<ProbeSite>,
}

impl ProbePlan {
    /// Build a plan from unordered sites, sorting and validating the
    /// uniqueness invariant (spec.md §3: "no two sites have identical
    /// (line, column, anchor, kind, payload)").
    pub fn new(mut sites: Vec<ProbeSite>) -> Self {
        sites.sort();
        sites.dedup();
        Self { sites }
    }

    pub fn sites(&self) -> &[ProbeSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeSite> {
        self.sites.iter()
    }
}

impl IntoIterator for ProbePlan {
    type Item = ProbeSite;
    type IntoIter = std::vec::IntoIter<ProbeSite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(line: u32, column: u32, anchor: Anchor, kind: ProbeKind) -> ProbeSite {
        ProbeSite {
            kind,
            line,
            column,
            anchor,
            correlation_token: format!("t{line}-{column}"),
        }
    }

    #[test]
    fn sorts_descending_by_line_then_column() {
        let plan = ProbePlan::new(vec![
            site(1, 1, Anchor::After, ProbeKind::FuncEntry { param_names: vec![] }),
            site(5, 1, Anchor::After, ProbeKind::FuncExit),
            site(3, 9, Anchor::Before, ProbeKind::LoopExit),
        ]);
        let lines: Vec<u32> = plan.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![5, 3, 1]);
    }

    #[test]
    fn before_sorts_ahead_of_after_at_same_position() {
        let plan = ProbePlan::new(vec![
            site(10, 4, Anchor::After, ProbeKind::FuncExit),
            site(10, 4, Anchor::Before, ProbeKind::LoopExit),
        ]);
        let anchors: Vec<Anchor> = plan.iter().map(|s| s.anchor).collect();
        assert_eq!(anchors, vec![Anchor::Before, Anchor::After]);
    }

    #[test]
    fn deduplicates_identical_sites() {
        let a = site(1, 1, Anchor::After, ProbeKind::FuncExit);
        let plan = ProbePlan::new(vec![a.clone(), a]);
        assert_eq!(plan.len(), 1);
    }
}
