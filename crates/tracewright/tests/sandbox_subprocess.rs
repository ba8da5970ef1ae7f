//! Exercises the actual compiled `tracewright` binary's `__run_splice__`
//! dispatch (spec.md §4.C7) as a real OS subprocess — the one thing that
//! can't be verified from inside `tracewright-sandbox`'s own tests, since
//! `ProcessSandboxExecutor` re-execs `std::env::current_exe()`, which
//! inside `cargo test` is the test harness binary, not this crate's `bin`.

use std::process::Command;

use tracewright_core::{Anchor, GeneratorMode, Insertion, Language, Provenance, Transformer};

fn sample_transformer() -> Transformer {
    Transformer {
        language: Language::Python,
        function_name: "f".into(),
        insertions: vec![Insertion {
            line: 1,
            column: 1,
            anchor: Anchor::After,
            probe_text: "__trace_probe__(\"x\")".into(),
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
fn run_splice_marker_applies_the_program_and_prints_instrumented_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let transformer_path = dir.path().join("transformer.json");
    std::fs::write(&transformer_path, serde_json::to_vec(&sample_transformer()).unwrap()).unwrap();
    let input_path = dir.path().join("input.bytes");
    std::fs::write(&input_path, b"    return 1\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tracewright"))
        .arg("__run_splice__")
        .arg(&transformer_path)
        .arg(&input_path)
        .output()
        .expect("failed to spawn the tracewright binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("__trace_probe__(\"x\")"));
    assert!(stdout.contains("return 1"));
}

#[test]
fn invoking_without_the_marker_exits_nonzero_and_does_not_run_as_a_cli() {
    let output = Command::new(env!("CARGO_BIN_EXE_tracewright"))
        .arg("--help")
        .output()
        .expect("failed to spawn the tracewright binary");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
