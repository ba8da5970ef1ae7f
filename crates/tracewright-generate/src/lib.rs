//! # tracewright-generate
//!
//! Transformer Generator (spec.md §4.C3): template path first, oracle path
//! only when the template raises `TemplateNotApplicable`. Both paths also
//! produce the `GeneratedTest` fixture the Validator runs (§4.C5).

pub mod oracle;
pub mod template;
pub mod testgen;

use std::time::Duration;

use tracewright_core::{FunctionRecord, GenerationError, Language, Oracle, ProbePlan, Transformer};
use tracewright_lessons::{LessonNote, PromptBuilder};

#[derive(Debug)]
pub struct GeneratedArtifact {
    pub transformer: Transformer,
    pub test: tracewright_core::GeneratedTest,
}

/// Configuration for an oracle fallback attempt, absent when no oracle is
/// configured (spec.md §6.4: core degrades to template-only).
pub struct OracleConfig<'a> {
    pub oracle: &'a dyn Oracle,
    pub prompt_builder: &'a PromptBuilder,
    pub lessons: &'a [LessonNote],
    pub max_prompt_tokens: usize,
    pub timeout: Duration,
}

/// Generate a Transformer for one function, trying the template path first
/// and falling back to the oracle path only on `TemplateNotApplicable`
/// (spec.md §4.C3 choice policy).
pub fn generate(
    function: &FunctionRecord,
    plan: &ProbePlan,
    language: Language,
    lesson_corpus_version: &str,
    oracle_config: Option<&OracleConfig<'_>>,
) -> Result<GeneratedArtifact, GenerationError> {
    let synthesizer = template::synthesizer_for(language);
    let template_result = synthesizer.generate(function, plan, lesson_corpus_version);

    let transformer = match template_result {
        Ok(transformer) => transformer,
        Err(GenerationError::TemplateNotApplicable { kind, language: lang }) => {
            let Some(cfg) = oracle_config else {
                return Err(GenerationError::TemplateNotApplicable { kind, language: lang });
            };
            oracle::generate(
                cfg.oracle,
                cfg.prompt_builder,
                function,
                plan,
                language,
                cfg.lessons,
                lesson_corpus_version,
                cfg.max_prompt_tokens,
                cfg.timeout,
            )?
        }
        Err(other) => return Err(other),
    };

    let test = testgen::synthesize(function, language, &transformer);
    Ok(GeneratedArtifact { transformer, test })
}
