//! Property-based tests for the syntactic check (spec.md §4.C5, check 1).
//!
//! Any well-formed insertion — 1-indexed position, non-blank probe text, a
//! recognized kind tag — passes regardless of its specific values; any
//! insertion with a zero coordinate or blank probe text always fails.

use proptest::prelude::*;

use tracewright_core::{Anchor, GeneratorMode, Insertion, Language, Provenance, Transformer};
use tracewright_validate::validator::syntactic;

const KNOWN_TAGS: &[&str] = &[
    "array_access",
    "array_create",
    "array_modify",
    "call_trace",
    "cond_entry",
    "cond_exit",
    "exc_caught",
    "exc_enter",
    "exc_exit",
    "func_entry",
    "func_exit",
    "loop_entry",
    "loop_exit",
    "return_value",
    "var_change",
];

fn transformer(insertions: Vec<Insertion>) -> Transformer {
    Transformer {
        language: Language::Python,
        function_name: "f".into(),
        insertions,
        provenance: Provenance {
            generator_mode: GeneratorMode::Template,
            oracle_model: None,
            lesson_corpus_version: "v1".into(),
            refactor_attempts: 0,
        },
    }
}

fn arb_known_tag() -> impl Strategy<Value = &'static str> {
    (0..KNOWN_TAGS.len()).prop_map(|i| KNOWN_TAGS[i])
}

proptest! {
    #[test]
    fn prop_well_formed_insertions_always_pass(
        line in 1u32..10_000,
        column in 1u32..500,
        probe_text in "[a-zA-Z0-9_() \"]{1,40}",
        kind_tag in arb_known_tag(),
    ) {
        prop_assume!(!probe_text.trim().is_empty());
        let t = transformer(vec![Insertion { line, column, anchor: Anchor::After, probe_text, kind_tag: kind_tag.to_string() }]);
        prop_assert!(syntactic::check(&t).is_ok());
    }

    #[test]
    fn prop_zero_coordinate_always_fails(
        zero_is_line in any::<bool>(),
        other in 1u32..500,
        kind_tag in arb_known_tag(),
    ) {
        let (line, column) = if zero_is_line { (0, other) } else { (other, 0) };
        let t = transformer(vec![Insertion {
            line,
            column,
            anchor: Anchor::After,
            probe_text: "__trace_probe__(\"x\")".into(),
            kind_tag: kind_tag.to_string(),
        }]);
        prop_assert!(syntactic::check(&t).is_err());
    }
}
