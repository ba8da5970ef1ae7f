//! Fingerprint / Normalization (spec.md §4.C10): the content-addressing key
//! a function's instrumented form is cached under.
//!
//! Normalization rules (spec.md §4.C10):
//! - line endings normalized to LF
//! - trailing whitespace per line stripped
//! - comments preserved (they can affect what a template inserts nothing
//!   w.r.t. probes, but two functions differing only in comments are still
//!   different source and must not collide)
//! - internal whitespace is NOT collapsed
//! - probe-plan line numbers are already relative to the function's own
//!   span (the Probe Plan Builder re-bases them), so moving a function
//!   within a file without otherwise touching it does not change its
//!   fingerprint
//! - language and the lesson corpus version are both folded in, so a
//!   corpus update invalidates every cached script transparently

use tracewright_core::{FunctionRecord, Language, ProbePlan};

pub fn normalize_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).replace("\r\n", "\n");
    text.lines().map(|line| line.trim_end()).collect::<Vec<_>>().join("\n")
}

pub fn compute(
    function: &FunctionRecord,
    plan: &ProbePlan,
    language: Language,
    lesson_corpus_version: &str,
) -> tracewright_core::Fingerprint {
    let normalized_body = normalize_body(&function.span_bytes);

    let mut buf = Vec::new();
    buf.extend_from_slice(language.short_id().as_bytes());
    buf.push(0);
    buf.extend_from_slice(lesson_corpus_version.as_bytes());
    buf.push(0);
    buf.extend_from_slice(normalized_body.as_bytes());
    buf.push(0);

    for site in plan.iter() {
        buf.extend_from_slice(&site.line.to_le_bytes());
        buf.extend_from_slice(&site.column.to_le_bytes());
        // serde_json gives a deterministic field order for a derived enum,
        // so the full payload (not just the kind tag) folds into the key.
        if let Ok(encoded) = serde_json::to_vec(&site.kind) {
            buf.extend_from_slice(&encoded);
        }
        buf.push(b'\n');
    }

    tracewright_core::hashing::fingerprint_bytes(&buf)
}
