//! Oracle-path Transformer generation (spec.md §4.C3 fallback path). The
//! oracle is prompted to emit the same splice-program JSON schema the
//! template path produces (`tracewright_core::Insertion`), so downstream
//! validation is uniform across both generator paths.

use std::time::Duration;

use tracewright_core::{
    FunctionRecord, GenerationError, GeneratorMode, Insertion, Language, Oracle, OracleError, ProbePlan, Provenance,
    Transformer,
};
use tracewright_lessons::{LessonNote, PromptBuilder};

#[derive(Debug, serde::Deserialize)]
struct OracleTransformerResponse {
    insertions: Vec<Insertion>,
}

#[allow(clippy::too_many_arguments)]
pub fn generate(
    oracle: &dyn Oracle,
    prompt_builder: &PromptBuilder,
    function: &FunctionRecord,
    plan: &ProbePlan,
    language: Language,
    lessons: &[LessonNote],
    lesson_corpus_version: &str,
    max_prompt_tokens: usize,
    timeout: Duration,
) -> Result<Transformer, GenerationError> {
    let prompt = prompt_builder.build_generation_prompt(function, plan, language, lessons, max_prompt_tokens);
    let response = oracle.ask(&prompt, timeout).map_err(|e| match e {
        OracleError::Timeout => GenerationError::OracleTimeout,
        other => GenerationError::OracleUnavailable(other.to_string()),
    })?;

    let json = extract_json_block(&response);
    let parsed: OracleTransformerResponse =
        serde_json::from_str(json).map_err(|e| GenerationError::MalformedOracleTransformer(e.to_string()))?;

    Ok(Transformer {
        language,
        function_name: function.name.clone(),
        insertions: parsed.insertions,
        provenance: Provenance {
            generator_mode: GeneratorMode::Oracle,
            oracle_model: Some(oracle.model_id().to_string()),
            lesson_corpus_version: lesson_corpus_version.to_string(),
            refactor_attempts: 0,
        },
    })
}

/// Oracles are prompted for bare JSON but frequently fence it anyway.
fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }
    trimmed
}
