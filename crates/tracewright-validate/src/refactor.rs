//! Refactor Loop (spec.md §4.C6): an explicit state machine bounding how
//! many times a Transformer may be rewritten after a failed validation.

use std::time::Duration;

use tracewright_core::{
    FunctionRecord, GeneratedTest, GeneratorMode, InvalidReason, Insertion, Language, Oracle, OracleError, ProbePlan,
    Provenance, RefactorExhausted, SandboxExecutor, Transformer,
};
use tracewright_lessons::{LessonNote, PromptBuilder};

/// `{Draft, Validated, FailedGeneration, FailedValidation, Exhausted,
/// Accepted}` per spec.md §4.C6. `FailedGeneration` is never produced by
/// `transition` — it is the state a caller records directly when the
/// Transformer Generator (§4.C3) itself fails, before a Draft exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefactorState {
    Draft,
    Validated,
    FailedGeneration,
    FailedValidation,
    Exhausted,
    Accepted,
}

pub struct RefactorConfig<'a> {
    pub oracle: &'a dyn Oracle,
    pub prompt_builder: &'a PromptBuilder,
    pub lessons: &'a [LessonNote],
    pub max_prompt_tokens: usize,
    pub oracle_timeout: Duration,
    pub sandbox_timeout: Duration,
    pub max_refactor_attempts: u32,
}

/// Drive a Transformer through `Draft -> {Validated -> Accepted} |
/// {FailedValidation -> Draft}*` until it is accepted or the attempt
/// budget is exhausted (spec.md §4.C6's termination guarantee).
#[allow(clippy::too_many_arguments)]
pub fn run(
    executor: &dyn SandboxExecutor,
    mut transformer: Transformer,
    mut test: GeneratedTest,
    function: &FunctionRecord,
    plan: &ProbePlan,
    language: Language,
    lesson_corpus_version: &str,
    config: &RefactorConfig<'_>,
) -> Result<(Transformer, GeneratedTest), RefactorExhausted> {
    let mut attempts = transformer.provenance.refactor_attempts;
    let mut state = RefactorState::Draft;
    let mut last_reasons: Vec<InvalidReason> = Vec::new();

    loop {
        state = match state {
            RefactorState::Draft => match crate::validate(executor, &transformer, &test, config.sandbox_timeout) {
                Ok(()) => RefactorState::Validated,
                Err(reasons) => {
                    last_reasons = reasons;
                    RefactorState::FailedValidation
                }
            },
            RefactorState::FailedValidation => {
                if attempts + 1 > config.max_refactor_attempts {
                    RefactorState::Exhausted
                } else {
                    attempts += 1;
                    match rewrite(&transformer, &last_reasons, function, plan, language, lesson_corpus_version, attempts, config) {
                        Ok((new_transformer, new_test)) => {
                            transformer = new_transformer;
                            test = new_test;
                            RefactorState::Draft
                        }
                        Err(reason) => {
                            last_reasons.push(reason);
                            RefactorState::Exhausted
                        }
                    }
                }
            }
            RefactorState::Validated => RefactorState::Accepted,
            RefactorState::Accepted => return Ok((transformer, test)),
            RefactorState::Exhausted => return Err(RefactorExhausted { attempts, reasons: last_reasons }),
            RefactorState::FailedGeneration => {
                unreachable!("FailedGeneration is set by the caller, never entered by the refactor loop")
            }
        };
    }
}

#[allow(clippy::too_many_arguments)]
fn rewrite(
    previous: &Transformer,
    reasons: &[InvalidReason],
    function: &FunctionRecord,
    plan: &ProbePlan,
    language: Language,
    lesson_corpus_version: &str,
    attempt: u32,
    config: &RefactorConfig<'_>,
) -> Result<(Transformer, GeneratedTest), InvalidReason> {
    let summary = reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
    let previous_json = serde_json::to_string_pretty(&previous.insertions).unwrap_or_default();
    let prompt_body = config.prompt_builder.build_refactor_prompt(
        function,
        plan,
        language,
        config.lessons,
        config.max_prompt_tokens,
        &format!("previous transformer:\n{previous_json}\n\nvalidation failures:\n{summary}"),
    );

    let response = config.oracle.ask(&prompt_body, config.oracle_timeout).map_err(|e| match e {
        OracleError::Timeout => InvalidReason::Behavioral("oracle rewrite timed out".into()),
        other => InvalidReason::Behavioral(format!("oracle rewrite unavailable: {other}")),
    })?;

    let json = extract_json_block(&response);
    let insertions: Vec<Insertion> =
        serde_json::from_str(json).map_err(|e| InvalidReason::Syntactic(format!("oracle rewrite unparsable: {e}")))?;

    let new_transformer = Transformer {
        language,
        function_name: function.name.clone(),
        insertions,
        provenance: Provenance {
            generator_mode: GeneratorMode::Oracle,
            oracle_model: Some(config.oracle.model_id().to_string()),
            lesson_corpus_version: lesson_corpus_version.to_string(),
            refactor_attempts: attempt,
        },
    };
    let new_test = tracewright_generate::testgen::synthesize(function, language, &new_transformer);
    Ok((new_transformer, new_test))
}

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
