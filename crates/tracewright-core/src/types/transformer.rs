//! Transformer — a self-contained, deterministic splice program.
//!
//! spec.md §9 leaves the Transformer's implementation language unspecified.
//! This implementation resolves that (see `SPEC_FULL.md` §4.C7 / `DESIGN.md`)
//! by representing every Transformer, template- or oracle-generated, as a
//! serialized list of insertions interpreted by a fixed sandboxed
//! interpreter rather than as arbitrary host-language source. A Transformer
//! is still "a standalone program artifact" per spec.md §3: it embeds its
//! full Probe Plan and is invoked with the stable I/O contract from §6.3.

use super::language::Language;
use super::probe::{Anchor, ProbeKind};

/// One splice instruction: insert `probe_text` at `(line, column)` relative
/// to `anchor`, copying indentation from the anchor line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Insertion {
    pub line: u32,
    pub column: u32,
    pub anchor: Anchor,
    pub probe_text: String,
    pub kind_tag: String,
}

/// How a Transformer came to exist (spec.md §3 `CacheEntry.provenance`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GeneratorMode {
    Template,
    Oracle,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Provenance {
    pub generator_mode: GeneratorMode,
    pub oracle_model: Option<String>,
    pub lesson_corpus_version: String,
    pub refactor_attempts: u32,
}

/// A self-contained, deterministic splice program: given the original
/// function text, it produces the instrumented text by inserting
/// `insertions` in descending order (spec.md §4.C3's template-path recipe,
/// generalized to also be the oracle path's output format).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Transformer {
    pub language: Language,
    pub function_name: String,
    /// Descending-sorted per `ProbeSite::cmp` — the exact order the
    /// interpreter must apply them in (spec.md §4.C3: "insertions are
    /// applied in descending order so earlier-indexed positions are never
    /// invalidated").
    pub insertions: Vec<Insertion>,
    pub provenance: Provenance,
}

impl Transformer {
    pub fn probe_texts(&self) -> impl Iterator<Item = &str> {
        self.insertions.iter().map(|i| i.probe_text.as_str())
    }
}

/// A Generated Test: given a Transformer and a fixed Function Record,
/// asserts the properties in spec.md §4.C5's behavioral check.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GeneratedTest {
    /// The exact bytes fed to the Transformer as its input argument.
    pub synthetic_input: Vec<u8>,
    /// Every probe-call text that must appear exactly once in the output.
    pub expected_probe_texts: Vec<String>,
    /// The original function's non-whitespace, non-comment tokens, in
    /// order, that must survive untouched in the output (spec.md §4.C5(c)).
    pub expected_token_sequence: Vec<String>,
}

/// Build the canonical splice-DSL payload carried by a `ProbeKind`, used
/// both to render probe-call text and to keep `kind_tag` consistent with
/// `ProbeKind::tag()`.
pub fn kind_tag(kind: &ProbeKind) -> &'static str {
    kind.tag()
}
