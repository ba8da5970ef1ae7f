//! Parallel Dispatcher (spec.md §4.C8): a bounded-concurrency worker pool
//! running the full per-item pipeline (cache lookup, generate, validate,
//! refactor, store, execute) with per-item failure isolation.
//!
//! Generalizes `drift-analysis::scanner::scanner::Scanner::scan`'s
//! `par_iter()` pattern: a rayon thread pool capped at `max_workers`
//! drives an indexed parallel iterator, so `collect()` preserves input
//! order regardless of completion order (spec.md's ordering guarantee)
//! without a separate sort pass.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracewright_cache::ScriptCache;
use tracewright_core::{
    CancellationToken, FailureReason, GeneratedTest, Language, Oracle, SandboxExecutor, Transformer, WorkItem,
    WorkResult,
};
use tracewright_generate::OracleConfig;
use tracewright_lessons::{LessonNote, PromptBuilder};
use tracewright_validate::refactor::RefactorConfig;

/// Shared, read-only configuration for one batch (spec.md §4.C8/§6.1).
pub struct DispatchConfig<'a> {
    pub language: Language,
    pub lesson_corpus_version: &'a str,
    pub oracle: &'a dyn Oracle,
    pub prompt_builder: &'a PromptBuilder,
    pub lessons: &'a [LessonNote],
    pub max_prompt_tokens: usize,
    pub oracle_timeout: Duration,
    pub sandbox_timeout: Duration,
    pub max_refactor_attempts: u32,
    pub max_workers: usize,
}

/// `run_batch(work_items, max_workers) -> list<WorkResult>` (spec.md
/// §4.C8): `results[i]` corresponds to `work_items[i]`. The Script Cache
/// is the only mutable resource shared across workers, so it is guarded
/// by a single mutex rather than handed one lock per shard — contention
/// is bounded by `max_workers` and every critical section is a plain
/// index read/write (spec.md: "filesystem cache is the only mutable
/// shared resource").
pub fn run_batch(
    work_items: &[WorkItem],
    config: &DispatchConfig<'_>,
    cache: &Mutex<ScriptCache>,
    executor: &dyn SandboxExecutor,
    cancellation: &CancellationToken,
) -> Vec<WorkResult> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.max_workers.max(1)).build();

    let work = || {
        work_items
            .par_iter()
            .map(|item| process_one(item, config, cache, executor, cancellation))
            .collect()
    };

    match pool {
        Ok(pool) => pool.install(work),
        Err(error) => {
            tracing::warn!(%error, "failed to build a bounded thread pool, falling back to sequential processing");
            work_items.iter().map(|item| process_one(item, config, cache, executor, cancellation)).collect()
        }
    }
}

enum CacheLookup {
    Hit(Transformer, GeneratedTest),
    Miss,
}

fn try_lookup(cache: &Mutex<ScriptCache>, fingerprint: tracewright_core::Fingerprint) -> CacheLookup {
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    match cache.lookup(fingerprint) {
        Ok(Some((_entry, bodies))) => CacheLookup::Hit(bodies.transformer, bodies.test),
        Ok(None) => CacheLookup::Miss,
        Err(error) => {
            tracing::warn!(%error, "cache lookup failed, bypassing the cache for this item");
            CacheLookup::Miss
        }
    }
}

fn store(cache: &Mutex<ScriptCache>, item: &WorkItem, transformer: &Transformer, test: &GeneratedTest) {
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(error) = cache.store(item.fingerprint, transformer, test, transformer.provenance.clone()) {
        tracing::warn!(%error, "failed to persist validated transformer, continuing uncached");
    }
}

/// One Work Item through the full pipeline (spec.md §4.C8's per-worker
/// recipe). Checked for cancellation at admission, after the cache lookup
/// (the first suspension point), and before the sandbox call.
fn process_one(
    item: &WorkItem,
    config: &DispatchConfig<'_>,
    cache: &Mutex<ScriptCache>,
    executor: &dyn SandboxExecutor,
    cancellation: &CancellationToken,
) -> WorkResult {
    if cancellation.is_cancelled() {
        return WorkResult::Failure(FailureReason::Cancelled);
    }

    let (transformer, _test, cached) = match try_lookup(cache, item.fingerprint) {
        CacheLookup::Hit(transformer, test) => (transformer, test, true),
        CacheLookup::Miss => {
            if cancellation.is_cancelled() {
                return WorkResult::Failure(FailureReason::Cancelled);
            }

            let oracle_config = OracleConfig {
                oracle: config.oracle,
                prompt_builder: config.prompt_builder,
                lessons: config.lessons,
                max_prompt_tokens: config.max_prompt_tokens,
                timeout: config.oracle_timeout,
            };
            let artifact = match tracewright_generate::generate(
                &item.function,
                &item.plan,
                config.language,
                config.lesson_corpus_version,
                Some(&oracle_config),
            ) {
                Ok(artifact) => artifact,
                Err(error) => return WorkResult::Failure(FailureReason::Generation(error.to_string())),
            };

            let refactor_config = RefactorConfig {
                oracle: config.oracle,
                prompt_builder: config.prompt_builder,
                lessons: config.lessons,
                max_prompt_tokens: config.max_prompt_tokens,
                oracle_timeout: config.oracle_timeout,
                sandbox_timeout: config.sandbox_timeout,
                max_refactor_attempts: config.max_refactor_attempts,
            };
            let (transformer, test) = match tracewright_validate::refactor::run(
                executor,
                artifact.transformer,
                artifact.test,
                &item.function,
                &item.plan,
                config.language,
                config.lesson_corpus_version,
                &refactor_config,
            ) {
                Ok(pair) => pair,
                Err(exhausted) => return WorkResult::Failure(FailureReason::Refactor(exhausted.to_string())),
            };

            store(cache, item, &transformer, &test);
            (transformer, test, false)
        }
    };

    if cancellation.is_cancelled() {
        return WorkResult::Failure(FailureReason::Cancelled);
    }

    let started = Instant::now();
    match executor.execute(&transformer, &item.original_bytes, config.sandbox_timeout) {
        Ok(outcome) if outcome.timed_out => WorkResult::Failure(FailureReason::Timeout),
        Ok(outcome) if outcome.exit_code != 0 => WorkResult::Failure(FailureReason::Execution(outcome.stderr_tail())),
        Ok(outcome) if std::str::from_utf8(&outcome.stdout).is_err() => WorkResult::Failure(FailureReason::Encoding),
        Ok(outcome) => {
            WorkResult::Success { instrumented_text: outcome.stdout, cached, transformer_duration: started.elapsed() }
        }
        Err(error) => WorkResult::Failure(FailureReason::Execution(error.to_string())),
    }
}
