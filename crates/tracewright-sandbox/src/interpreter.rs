//! The splice-program interpreter: applies a Transformer's `insertions`
//! to the original function bytes (spec.md §3's "self-contained,
//! deterministic" requirement, §4.C3's descending-application recipe).
//!
//! This is the *only* thing a sandboxed child process ever executes —
//! there is no host-language interpreter (python/node/go) invoked here.

use tracewright_core::{Anchor, Insertion, Transformer};

#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    #[error("input is not valid UTF-8")]
    Encoding,
    #[error("insertion targets line {line}, source has {available} lines")]
    LineOutOfRange { line: u32, available: usize },
}

/// Apply every insertion to `source`, returning the instrumented bytes.
/// Deterministic: the same `(transformer, source)` pair always produces
/// byte-identical output (I3).
pub fn apply(transformer: &Transformer, source: &[u8]) -> Result<Vec<u8>, InterpreterError> {
    let text = std::str::from_utf8(source).map_err(|_| InterpreterError::Encoding)?;
    let trailing_newline = text.ends_with('\n');
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();

    let mut insertions: Vec<&Insertion> = transformer.insertions.iter().collect();
    insertions.sort_by_key(|i| (std::cmp::Reverse(i.line), std::cmp::Reverse(i.column), anchor_order(i.anchor)));

    for insertion in insertions {
        let index = insertion.line as usize;
        if index == 0 || index > lines.len() {
            return Err(InterpreterError::LineOutOfRange { line: insertion.line, available: lines.len() });
        }
        let anchor_line = &lines[index - 1];
        let indent: String = anchor_line.chars().take_while(|c| c.is_whitespace()).collect();
        let rendered = format!("{indent}{}", insertion.probe_text);

        let insert_at = match insertion.anchor {
            Anchor::Before => index - 1,
            Anchor::After => index,
        };
        lines.insert(insert_at, rendered);
    }

    let mut output = lines.join("\n");
    if trailing_newline {
        output.push('\n');
    }
    Ok(output.into_bytes())
}

fn anchor_order(anchor: Anchor) -> u8 {
    match anchor {
        Anchor::Before => 0,
        Anchor::After => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::{GeneratorMode, Language, Provenance};

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

    fn insertion(line: u32, anchor: Anchor, probe_text: &str) -> Insertion {
        Insertion { line, column: 1, anchor, probe_text: probe_text.into(), kind_tag: "func_exit".to_string() }
    }

    #[test]
    fn inserts_before_and_after_with_matching_indentation() {
        let source = b"def f():\n    return 1\n";
        let t = transformer(vec![
            insertion(2, Anchor::Before, "__trace_probe__(\"entry\")"),
            insertion(2, Anchor::After, "__trace_probe__(\"exit\")"),
        ]);
        let out = String::from_utf8(apply(&t, source).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["def f():", "    __trace_probe__(\"entry\")", "    return 1", "    __trace_probe__(\"exit\")"]);
    }

    #[test]
    fn preserves_absence_of_trailing_newline() {
        let source = b"def f():\n    return 1";
        let t = transformer(vec![insertion(2, Anchor::After, "__trace_probe__(\"exit\")")]);
        let out = apply(&t, source).unwrap();
        assert!(!out.ends_with(b"\n"));
    }

    #[test]
    fn two_independent_runs_produce_identical_bytes() {
        let source = b"def f():\n    return 1\n";
        let t = transformer(vec![insertion(2, Anchor::After, "__trace_probe__(\"x\")")]);
        assert_eq!(apply(&t, source).unwrap(), apply(&t, source).unwrap());
    }

    #[test]
    fn rejects_out_of_range_line() {
        let source = b"def f(): pass\n";
        let t = transformer(vec![insertion(5, Anchor::After, "__trace_probe__(\"x\")")]);
        assert!(matches!(apply(&t, source), Err(InterpreterError::LineOutOfRange { .. })));
    }

    #[test]
    fn non_utf8_input_surfaces_as_encoding_error() {
        let source = [0xff, 0xfe, 0x00];
        let t = transformer(vec![]);
        assert!(matches!(apply(&t, &source), Err(InterpreterError::Encoding)));
    }
}
