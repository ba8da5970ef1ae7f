//! Integration tests for the Parallel Dispatcher's named scenarios
//! (spec.md §8 S4-S6): a timed-out item is isolated without aborting the
//! batch, two items with an identical fingerprint collapse onto one cache
//! entry, and a 100-item mixed batch preserves input order across hits,
//! fresh successes, and an exhausted refactor.

use std::sync::Mutex;
use std::time::Duration;

use tracewright_core::{
    Anchor, CancellationToken, ExecutionError, FailureReason, FunctionId, FunctionRecord, Language, ProbeKind,
    ProbePlan, ProbeSite, SandboxExecutor, SandboxOutcome, StubOracle, Transformer, WorkItem, WorkResult,
};
use tracewright_dispatch::{compose, run_batch, DispatchConfig};
use tracewright_lessons::PromptBuilder;

fn make_plan() -> ProbePlan {
    ProbePlan::new(vec![ProbeSite {
        kind: ProbeKind::FuncExit,
        line: 1,
        column: 1,
        anchor: Anchor::After,
        correlation_token: "t".into(),
    }])
}

fn make_function(name: &str, body_line: &str) -> FunctionRecord {
    make_function_at(name, body_line, 0)
}

fn make_function_at(name: &str, body_line: &str, start_offset: usize) -> FunctionRecord {
    let span = format!("    {body_line}\n");
    FunctionRecord {
        id: FunctionId(0),
        name: name.into(),
        signature_text: format!("def {name}():"),
        param_names: vec![],
        start_offset,
        end_offset: start_offset + span.len(),
        start_line: 1,
        end_line: 1,
        indent_prefix: "    ".into(),
        span_bytes: span.into_bytes(),
        nested_in: None,
    }
}

/// Lays out a sequence of functions one after another in a synthetic
/// source buffer, returning the buffer and the functions with
/// `start_offset`/`end_offset` set to their actual position in it, so a
/// `compose()` call against the returned source is non-overlapping.
fn lay_out(specs: &[(String, String)]) -> (Vec<u8>, Vec<FunctionRecord>) {
    let mut source = Vec::new();
    let mut functions = Vec::new();
    for (name, body_line) in specs {
        let function = make_function_at(name, body_line, source.len());
        source.extend_from_slice(&function.span_bytes);
        functions.push(function);
    }
    (source, functions)
}

fn make_work_item(function: &FunctionRecord, plan: &ProbePlan) -> WorkItem {
    let fingerprint = tracewright_analysis::fingerprint::compute(function, plan, Language::Python, "v1");
    WorkItem { function: function.clone(), plan: plan.clone(), fingerprint, original_bytes: function.span_bytes.clone() }
}

/// Runs a Transformer through the real splice interpreter, the same one
/// `tracewright-sandbox`'s process executor shells out to, but in-process
/// so these tests never spawn a subprocess. Duplicates its own stdout for
/// a function named `"bad"`, which fails the behavioral check's "probe
/// text appears exactly once" property on the very first attempt.
struct InterpreterExecutor;

impl SandboxExecutor for InterpreterExecutor {
    fn execute(&self, transformer: &Transformer, stdin: &[u8], _timeout: Duration) -> Result<SandboxOutcome, ExecutionError> {
        let mut stdout = tracewright_sandbox::interpreter::apply(transformer, stdin).map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;
        if transformer.function_name == "bad" {
            let duplicate = stdout.clone();
            stdout.extend_from_slice(&duplicate);
        }
        Ok(SandboxOutcome { exit_code: 0, stdout, stderr: Vec::new(), wall_duration: Duration::from_millis(1), timed_out: false })
    }
}

struct AlwaysTimesOut;

impl SandboxExecutor for AlwaysTimesOut {
    fn execute(&self, _t: &Transformer, _stdin: &[u8], _timeout: Duration) -> Result<SandboxOutcome, ExecutionError> {
        Ok(SandboxOutcome { exit_code: 0, stdout: Vec::new(), stderr: Vec::new(), wall_duration: Duration::from_secs(5), timed_out: true })
    }
}

fn config<'a>(
    oracle: &'a StubOracle,
    prompt_builder: &'a PromptBuilder,
    max_workers: usize,
) -> DispatchConfig<'a> {
    DispatchConfig {
        language: Language::Python,
        lesson_corpus_version: "v1",
        oracle,
        prompt_builder,
        lessons: &[],
        max_prompt_tokens: 4000,
        oracle_timeout: Duration::from_secs(1),
        sandbox_timeout: Duration::from_secs(1),
        max_refactor_attempts: 3,
        max_workers,
    }
}

/// S4: a sandbox timeout on one function fails only that function; the
/// batch completes and the File Composer leaves its original bytes intact.
#[test]
fn sandbox_timeout_isolates_the_failing_function() {
    let function = make_function("slow", "return 1");
    let plan = make_plan();
    let item = make_work_item(&function, &plan);

    let oracle = StubOracle;
    let builder = PromptBuilder::new("gpt-4");
    let cfg = config(&oracle, &builder, 1);
    let cache_dir = tempfile::tempdir().unwrap();
    let cache = Mutex::new(tracewright_cache::ScriptCache::open(cache_dir.path()).unwrap());
    let cancellation = CancellationToken::new();

    let results = run_batch(&[item.clone()], &cfg, &cache, &AlwaysTimesOut, &cancellation);
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], WorkResult::Failure(FailureReason::Timeout)));

    let source = function.span_bytes.clone();
    let composed = compose(&source, &[item], &results);
    assert_eq!(composed.replaced_count, 0);
    assert_eq!(composed.instrumented_source, source);
    assert!(matches!(
        composed.per_function_statuses["slow"],
        tracewright_core::FunctionStatus::Failure { .. }
    ));
}

/// S5: two functions with byte-identical normalized bodies and plans share
/// one fingerprint. Run sequentially (one worker) so the outcome is
/// deterministic: the first item is a cache miss that stores, the second
/// is a cache hit, and at most one `store` ever happens for that key.
#[test]
fn identical_functions_collapse_onto_one_cache_entry() {
    let a = make_function("a", "return 1");
    let b = make_function("b", "return 1");
    let plan = make_plan();
    let item_a = make_work_item(&a, &plan);
    let item_b = make_work_item(&b, &plan);
    assert_eq!(item_a.fingerprint, item_b.fingerprint);

    let oracle = StubOracle;
    let builder = PromptBuilder::new("gpt-4");
    let cfg = config(&oracle, &builder, 1);
    let cache_dir = tempfile::tempdir().unwrap();
    let cache = Mutex::new(tracewright_cache::ScriptCache::open(cache_dir.path()).unwrap());
    let cancellation = CancellationToken::new();

    let results = run_batch(&[item_a, item_b], &cfg, &cache, &InterpreterExecutor, &cancellation);
    assert_eq!(results.len(), 2);

    let (first_text, first_cached) = match &results[0] {
        WorkResult::Success { instrumented_text, cached, .. } => (instrumented_text.clone(), *cached),
        WorkResult::Failure(reason) => panic!("expected success, got {reason}"),
    };
    let (second_text, second_cached) = match &results[1] {
        WorkResult::Success { instrumented_text, cached, .. } => (instrumented_text.clone(), *cached),
        WorkResult::Failure(reason) => panic!("expected success, got {reason}"),
    };

    assert_eq!(first_text, second_text);
    assert!(!first_cached, "the first item to reach an empty cache should be a miss");
    assert!(second_cached, "the second item should observe the first's stored entry");

    let hit = cache.lock().unwrap().lookup(fingerprint_of(&a, &plan)).unwrap();
    assert!(hit.is_some(), "the shared fingerprint must resolve to exactly one stored entry");
}

fn fingerprint_of(function: &FunctionRecord, plan: &ProbePlan) -> tracewright_core::Fingerprint {
    tracewright_analysis::fingerprint::compute(function, plan, Language::Python, "v1")
}

/// S6: a 100-item batch mixing 97 cache hits, 2 fresh template successes,
/// and 1 item that exhausts its refactor budget. `results[i]` must line up
/// with `work_items[i]` regardless of completion order, and the Composer
/// must replace exactly the 99 successful spans.
#[test]
fn mixed_batch_of_one_hundred_preserves_order_and_isolates_the_one_failure() {
    let plan = make_plan();
    let oracle = StubOracle;
    let builder = PromptBuilder::new("gpt-4");
    let cache_dir = tempfile::tempdir().unwrap();
    let mut cache = tracewright_cache::ScriptCache::open(cache_dir.path()).unwrap();

    let mut specs: Vec<(String, String)> = Vec::new();
    let mut expect_cached = Vec::new();

    for i in 0..97 {
        specs.push((format!("hit_{i}"), format!("return {i}")));
        expect_cached.push(Some(true));
    }
    for i in 0..2 {
        specs.push((format!("fresh_{i}"), format!("return -{i}")));
        expect_cached.push(Some(false));
    }
    specs.push(("bad".into(), "return 999".into()));
    expect_cached.push(None);

    let (source, functions) = lay_out(&specs);

    for (function, cached) in functions.iter().zip(expect_cached.iter()) {
        if *cached == Some(true) {
            let fingerprint = tracewright_analysis::fingerprint::compute(function, &plan, Language::Python, "v1");
            let artifact = tracewright_generate::generate(function, &plan, Language::Python, "v1", None).unwrap();
            cache.store(fingerprint, &artifact.transformer, &artifact.test, artifact.transformer.provenance.clone()).unwrap();
        }
    }

    let work_items: Vec<WorkItem> = functions.iter().map(|f| make_work_item(f, &plan)).collect();

    let cache = Mutex::new(cache);
    let cfg = config(&oracle, &builder, 8);
    let cancellation = CancellationToken::new();
    let results = run_batch(&work_items, &cfg, &cache, &InterpreterExecutor, &cancellation);

    assert_eq!(results.len(), 100);

    let mut success_count = 0;
    let mut failure_count = 0;
    for (expected, result) in expect_cached.iter().zip(results.iter()) {
        match (expected, result) {
            (Some(want_cached), WorkResult::Success { cached, .. }) => {
                assert_eq!(cached, want_cached);
                success_count += 1;
            }
            (None, WorkResult::Failure(FailureReason::Refactor(_))) => {
                failure_count += 1;
            }
            (expected, result) => panic!("unexpected pairing: expected {expected:?}, got {result:?}"),
        }
    }
    assert_eq!(success_count, 99);
    assert_eq!(failure_count, 1);

    let composed = compose(&source, &work_items, &results);
    assert_eq!(composed.replaced_count, 99);
    assert!(matches!(composed.per_function_statuses["bad"], tracewright_core::FunctionStatus::Failure { .. }));
}
