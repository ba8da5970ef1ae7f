//! # tracewright
//!
//! Script-based instrumentation core (spec.md §1): rewrites function
//! bodies in a source file to emit runtime telemetry probes while
//! preserving behavior. `instrument_file` is the Core API (§6.1); the
//! `tracewright` binary built alongside this library hosts only the
//! `__run_splice__` sandboxed-execution worker entry point (§4.C7) and is
//! never a user-facing CLI (§1 Non-goals).

use std::sync::Mutex;
use std::time::Duration;

use tracewright_core::{
    CancellationToken, FileCompositionResult, Language, Options, ParseError, StubOracle, WorkItem,
};
use tracewright_dispatch::DispatchConfig;
use tracewright_lessons::PromptBuilder;
use tracewright_sandbox::executor::ProcessSandboxExecutor;

/// `instrument_file(source_bytes, language, options) -> FileCompositionResult`
/// (spec.md §6.1).
///
/// No external Oracle transport is bundled (§6.4): analysis falls back to
/// the structured tree-sitter strategy only, and generation degrades to
/// the template path. A function whose probe kinds the template can't
/// cover surfaces as a per-function `Failure`, not a whole-file error —
/// only a failure to parse the file at all, or to stand up the Script
/// Cache or Lesson Corpus, is fatal to the call.
pub fn instrument_file(
    source_bytes: &[u8],
    language: Language,
    options: &Options,
) -> Result<FileCompositionResult, ParseError> {
    instrument_file_with(source_bytes, language, options, &StubOracle, &CancellationToken::new())
}

/// Same as [`instrument_file`], but with the Oracle and cancellation
/// handle exposed for callers that embed this core into a larger run
/// (e.g. cancelling a batch partway through, or a host that owns its own
/// `CancellationToken` shared across files).
pub fn instrument_file_with(
    source_bytes: &[u8],
    language: Language,
    options: &Options,
    oracle: &dyn tracewright_core::Oracle,
    cancellation: &CancellationToken,
) -> Result<FileCompositionResult, ParseError> {
    let oracle_timeout = Duration::from_millis(options.oracle_timeout_ms);
    let analysis = tracewright_analysis::analyze(language, source_bytes, Some((oracle, oracle_timeout)))?;

    let lessons = tracewright_lessons::load_optional(options.lessons_root.as_ref())
        .map_err(|e| ParseError::LessonsUnavailable(e.to_string()))?;
    let lesson_notes = lessons.load(language).to_vec();

    let cache = tracewright_cache::ScriptCache::open(&options.cache_root)
        .map_err(|e| ParseError::CacheUnavailable(e.to_string()))?;
    let cache = Mutex::new(cache);

    let work_items: Vec<WorkItem> = analysis
        .top_level_functions()
        .map(|function| {
            let plan = analysis.plan_for(function.id).cloned().unwrap_or_default();
            let fingerprint =
                tracewright_analysis::fingerprint::compute(function, &plan, language, lessons.version());
            WorkItem {
                function: function.clone(),
                plan,
                fingerprint,
                original_bytes: function.span_bytes.clone(),
            }
        })
        .collect();

    let prompt_builder = PromptBuilder::new(oracle.model_id());
    let executor = ProcessSandboxExecutor::new().map_err(|e| ParseError::SandboxUnavailable(e.to_string()))?;
    let config = DispatchConfig {
        language,
        lesson_corpus_version: lessons.version(),
        oracle,
        prompt_builder: &prompt_builder,
        lessons: &lesson_notes,
        max_prompt_tokens: 4000,
        oracle_timeout,
        sandbox_timeout: Duration::from_millis(options.sandbox_timeout_ms),
        max_refactor_attempts: options.max_refactor_attempts,
        max_workers: options.effective_max_workers(),
    };

    let results = tracewright_dispatch::run_batch(&work_items, &config, &cache, &executor, cancellation);
    Ok(tracewright_dispatch::compose(source_bytes, &work_items, &results))
}
