//! Syntactic check (spec.md §4.C5, check 1).
//!
//! Transformers in this implementation are splice-DSL values rather than
//! host-language source (see `tracewright-core::types::transformer`), so
//! "parses in its implementation language" reduces to: every insertion
//! carries a recognized `kind_tag`, a valid 1-indexed position, and
//! non-empty probe text. A Transformer that fails this check could not
//! have been produced by either generator path without data corruption.

use tracewright_core::{InvalidReason, Transformer};

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

pub fn check(transformer: &Transformer) -> Result<(), InvalidReason> {
    if transformer.insertions.is_empty() {
        return Err(InvalidReason::Syntactic("transformer has no insertions".into()));
    }

    for insertion in &transformer.insertions {
        if insertion.line == 0 || insertion.column == 0 {
            return Err(InvalidReason::Syntactic(format!(
                "insertion at ({}, {}) is not 1-indexed",
                insertion.line, insertion.column
            )));
        }
        if insertion.probe_text.trim().is_empty() {
            return Err(InvalidReason::Syntactic(format!(
                "insertion at ({}, {}) carries empty probe text",
                insertion.line, insertion.column
            )));
        }
        if !KNOWN_TAGS.contains(&insertion.kind_tag.as_str()) {
            return Err(InvalidReason::Syntactic(format!("unrecognized kind_tag {:?}", insertion.kind_tag)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::{Anchor, GeneratorMode, Insertion, Language, Provenance};

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

    fn insertion(line: u32, column: u32, probe_text: &str, kind_tag: &str) -> Insertion {
        Insertion { line, column, anchor: Anchor::After, probe_text: probe_text.into(), kind_tag: kind_tag.to_string() }
    }

    #[test]
    fn accepts_a_well_formed_transformer() {
        let t = transformer(vec![insertion(2, 1, "__trace_probe__(\"x\")", "func_exit")]);
        assert!(check(&t).is_ok());
    }

    #[test]
    fn rejects_zero_indexed_position() {
        let t = transformer(vec![insertion(0, 1, "__trace_probe__(\"x\")", "func_exit")]);
        assert!(matches!(check(&t), Err(InvalidReason::Syntactic(_))));
    }

    #[test]
    fn rejects_unrecognized_kind_tag() {
        let t = transformer(vec![insertion(2, 1, "__trace_probe__(\"x\")", "totally_made_up")]);
        assert!(matches!(check(&t), Err(InvalidReason::Syntactic(_))));
    }

    #[test]
    fn rejects_empty_insertion_list() {
        let t = transformer(vec![]);
        assert!(check(&t).is_err());
    }
}
