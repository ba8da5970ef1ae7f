//! Probe Plan Builder (spec.md §4.C2): `plan(function_record, analysis_details)
//! -> ProbePlan`. Pure, no I/O.
//!
//! The ordering and uniqueness discipline spec.md §3 requires of a Probe
//! Plan already lives on `ProbePlan::new` itself, so this stays a thin
//! seam rather than duplicating that logic. It does carry one piece of
//! real work though: C1's strategies report `ProbeSite` coordinates
//! absolute within the source file (tree-sitter's natural coordinate
//! space), but a Probe Plan belongs to exactly one function and must be
//! addressable against that function's own `span_bytes` — so sites are
//! re-based here, before anything downstream ever sees them.
//!
//! Re-basing is a plain line-number shift; it does not change the
//! relative ordering `ProbePlan::new` sorts by, so build order is
//! irrelevant.

use tracewright_core::{FunctionRecord, ProbePlan, ProbeSite};

pub fn build_probe_plan(function: &FunctionRecord, raw_sites: Vec<ProbeSite>) -> ProbePlan {
    let rebased = raw_sites
        .into_iter()
        .map(|mut site| {
            site.line = site.line.saturating_sub(function.start_line) + 1;
            site
        })
        .collect();
    ProbePlan::new(rebased)
}
