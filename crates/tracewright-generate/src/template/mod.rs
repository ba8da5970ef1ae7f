//! Template-path Transformer synthesis (spec.md §4.C3). Each language gets
//! a thin `Synthesizer` declaring which probe kinds its template covers;
//! probe-call rendering itself is shared, since the splice-program call
//! convention (`__trace_probe__(<json>)`) is valid call syntax in every
//! language this core targets.

mod go;
mod javascript;
mod python;
mod typescript;

pub use go::GoSynthesizer;
pub use javascript::JavaScriptSynthesizer;
pub use python::PythonSynthesizer;
pub use typescript::TypeScriptSynthesizer;

use tracewright_core::{
    FunctionRecord, GenerationError, GeneratorMode, Insertion, Language, ProbeKind, ProbePlan, Provenance, Transformer,
};

/// A per-language template synthesizer (spec.md §4.C3).
pub trait Synthesizer: Send + Sync {
    fn language(&self) -> Language;

    /// Whether this language's template covers `kind`. Kinds it doesn't
    /// cover force the generator to fall back to the oracle path for the
    /// *whole function* (spec.md §4.C3: "a synthesizer may return
    /// TemplateNotApplicable for kind/language combinations it doesn't yet
    /// cover").
    fn supports(&self, kind: &ProbeKind) -> bool;

    /// Render the full template-path Transformer for one function, or
    /// `TemplateNotApplicable` for the first unsupported site encountered.
    /// `plan`'s sites are already relative to `function.span_bytes`, so
    /// `site.line`/`site.column` carry straight over into `Insertion`
    /// unchanged — the interpreter will apply them against that same span.
    fn generate(
        &self,
        function: &FunctionRecord,
        plan: &ProbePlan,
        lesson_corpus_version: &str,
    ) -> Result<Transformer, GenerationError> {
        let mut insertions = Vec::with_capacity(plan.len());
        for site in plan.iter() {
            if !self.supports(&site.kind) {
                return Err(GenerationError::TemplateNotApplicable {
                    kind: site.kind.tag().to_string(),
                    language: self.language().to_string(),
                });
            }
            insertions.push(Insertion {
                line: site.line,
                column: site.column,
                anchor: site.anchor,
                probe_text: render_probe_call(&site.kind, &site.correlation_token),
                kind_tag: site.kind.tag().to_string(),
            });
        }

        Ok(Transformer {
            language: self.language(),
            function_name: function.name.clone(),
            insertions,
            provenance: Provenance {
                generator_mode: GeneratorMode::Template,
                oracle_model: None,
                lesson_corpus_version: lesson_corpus_version.to_string(),
                refactor_attempts: 0,
            },
        })
    }
}

pub fn synthesizer_for(language: Language) -> Box<dyn Synthesizer> {
    match language {
        Language::Python => Box::new(PythonSynthesizer),
        Language::JavaScript => Box::new(JavaScriptSynthesizer),
        Language::TypeScript => Box::new(TypeScriptSynthesizer),
        Language::Go => Box::new(GoSynthesizer),
    }
}

/// Render one probe site as a call to the (out-of-scope-shaped) telemetry
/// runtime: `__trace_probe__("<json payload>")`. A plain call with a single
/// string literal argument parses identically in Python, JavaScript,
/// TypeScript, and Go, so one rendering serves all four template
/// synthesizers; only which kinds are *supported* varies by language.
fn render_probe_call(kind: &ProbeKind, correlation_token: &str) -> String {
    let payload = serde_json::json!({ "kind": kind, "correlation_token": correlation_token });
    let encoded = serde_json::to_string(&payload).expect("ProbeKind payload is always JSON-serializable");
    format!("__trace_probe__({encoded:?})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::Anchor;

    #[test]
    fn probe_call_embeds_kind_tag_and_token() {
        let text = render_probe_call(&ProbeKind::FuncExit, "tok-1");
        assert!(text.starts_with("__trace_probe__("));
        assert!(text.contains("func_exit"));
        assert!(text.contains("tok-1"));
    }

    #[test]
    fn probe_call_escapes_embedded_quotes_safely() {
        let kind = ProbeKind::CondEntry { branch_id: "b".into(), condition_text: "x == \"y\"".into() };
        let text = render_probe_call(&kind, "tok");
        // The outer call must still be well-formed: exactly one top-level
        // opening and closing paren pair around a single string literal.
        assert!(text.starts_with("__trace_probe__(\""));
        assert!(text.ends_with("\")"));
    }

    #[test]
    fn anchor_is_not_part_of_probe_text_rendering() {
        // Sanity: render_probe_call doesn't need the anchor; Insertion
        // carries it separately so the interpreter knows where to splice.
        let _ = Anchor::Before;
        let a = render_probe_call(&ProbeKind::LoopExit, "t");
        let b = render_probe_call(&ProbeKind::LoopExit, "t");
        assert_eq!(a, b);
    }
}
