//! Policy check (spec.md §4.C5, check 2): a deny-list over the probe-call
//! text and payload strings embedded in a Transformer, mirroring the
//! pattern-to-violation shape of a rules evaluator but with a fixed
//! accept/reject outcome rather than graduated severities — a Transformer
//! either may run in the sandbox or it may not.

use tracewright_core::{InvalidReason, Transformer};

struct DenyPattern {
    needle: &'static str,
    description: &'static str,
}

/// Named per spec.md §4.C5: dynamic code evaluation, process-spawning
/// primitives, shell invocation, and arbitrary dynamic module imports.
const DENY_LIST: &[DenyPattern] = &[
    DenyPattern { needle: "eval(", description: "dynamic code evaluation" },
    DenyPattern { needle: "exec(", description: "dynamic code evaluation" },
    DenyPattern { needle: "Function(", description: "dynamic code evaluation via Function constructor" },
    DenyPattern { needle: "os.system(", description: "operating-system shell invocation" },
    DenyPattern { needle: "subprocess.", description: "process-spawning primitive" },
    DenyPattern { needle: "os.popen(", description: "operating-system shell invocation" },
    DenyPattern { needle: "require('child_process')", description: "process-spawning primitive" },
    DenyPattern { needle: "require(\"child_process\")", description: "process-spawning primitive" },
    DenyPattern { needle: "child_process", description: "process-spawning primitive" },
    DenyPattern { needle: "os/exec", description: "process-spawning primitive" },
    DenyPattern { needle: "importlib", description: "arbitrary dynamic module import" },
    DenyPattern { needle: "__import__", description: "arbitrary dynamic module import" },
    DenyPattern { needle: "`", description: "backtick shell invocation" },
    DenyPattern { needle: "$(", description: "shell command substitution" },
];

pub fn check(transformer: &Transformer) -> Vec<InvalidReason> {
    let mut reasons = Vec::new();
    for insertion in &transformer.insertions {
        for pattern in DENY_LIST {
            if insertion.probe_text.contains(pattern.needle) {
                reasons.push(InvalidReason::Policy(format!(
                    "{} (matched {:?} in insertion at ({}, {}))",
                    pattern.description, pattern.needle, insertion.line, insertion.column
                )));
            }
        }
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::{Anchor, GeneratorMode, Insertion, Language, Provenance};

    fn transformer(probe_text: &str) -> Transformer {
        Transformer {
            language: Language::Python,
            function_name: "f".into(),
            insertions: vec![Insertion {
                line: 1,
                column: 1,
                anchor: Anchor::After,
                probe_text: probe_text.into(),
                kind_tag: "func_exit".to_string(),
            }],
            provenance: Provenance {
                generator_mode: GeneratorMode::Template,
                oracle_model: None,
                lesson_corpus_version: "v1".into(),
                refactor_attempts: 0,
            },
        }
    }

    #[test]
    fn clean_probe_text_has_no_violations() {
        assert!(check(&transformer("__trace_probe__(\"x\")")).is_empty());
    }

    #[test]
    fn flags_shell_invocation() {
        let reasons = check(&transformer("__trace_probe__(os.system(\"rm -rf /\"))"));
        assert!(!reasons.is_empty());
    }

    #[test]
    fn flags_process_spawning() {
        let reasons = check(&transformer("require('child_process').exec('ls')"));
        assert!(reasons.len() >= 2);
    }
}
