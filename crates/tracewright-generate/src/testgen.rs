//! Generated Test synthesis: builds the `GeneratedTest` fixture the
//! Validator's behavioral check (spec.md §4.C5(c)) runs a Transformer
//! against. Produced alongside a Transformer by both generator paths so
//! validation always has something to execute regardless of which path
//! produced the Transformer.

use tracewright_core::{FunctionRecord, GeneratedTest, Language, Transformer};

pub fn synthesize(function: &FunctionRecord, language: Language, transformer: &Transformer) -> GeneratedTest {
    GeneratedTest {
        synthetic_input: function.span_bytes.clone(),
        expected_probe_texts: transformer.probe_texts().map(str::to_string).collect(),
        expected_token_sequence: significant_tokens(&function.span_bytes, language),
    }
}

/// A best-effort tokenization used only to assert the original function's
/// meaningful tokens survive instrumentation untouched — not a real lexer.
/// Strips line comments and whitespace, keeps identifier/number runs and
/// individual punctuation/operator characters as their own tokens.
fn significant_tokens(body: &[u8], language: Language) -> Vec<String> {
    let text = String::from_utf8_lossy(body);
    let comment_marker = match language {
        Language::Python => "#",
        Language::JavaScript | Language::TypeScript | Language::Go => "//",
    };

    let mut tokens = Vec::new();
    for line in text.lines() {
        let code = match line.find(comment_marker) {
            Some(idx) => &line[..idx],
            None => line,
        };

        let mut current = String::new();
        for ch in code.chars() {
            if ch.is_alphanumeric() || ch == '_' {
                current.push(ch);
                continue;
            }
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !ch.is_whitespace() {
                tokens.push(ch.to_string());
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }
    tokens
}
