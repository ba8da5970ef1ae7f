//! Error-path coverage for `instrument_file`/`instrument_file_with` that
//! doesn't require the real sandboxed subprocess: whole-file setup failures
//! (unparseable source with no working oracle, an unusable cache root) are
//! expected to surface as `ParseError` before any function is dispatched.
//!
//! A genuine happy-path run of `instrument_file` would exercise
//! `ProcessSandboxExecutor`, which re-execs `std::env::current_exe()` — in
//! a `cargo test` binary that resolves to the test harness, not the
//! `tracewright` bin, so it can't be driven from here (see
//! `tests/sandbox_subprocess.rs`, which tests that dispatch against the
//! real compiled binary directly instead).

use tracewright_core::{Language, Options, ParseError};

fn options_with_cache_root(cache_root: std::path::PathBuf) -> Options {
    Options { cache_root, ..Options::default() }
}

#[test]
fn unparseable_source_with_no_oracle_surfaces_as_a_parse_error() {
    let cache_dir = tempfile::tempdir().unwrap();
    let options = options_with_cache_root(cache_dir.path().to_path_buf());

    // An unterminated triple-quoted string leaves tree-sitter with an ERROR
    // node, so the structured strategy fails; `instrument_file`'s bundled
    // `StubOracle` then fails too, and the combined failure must surface
    // rather than silently analyzing as zero functions.
    let source = b"def broken(:\n    \"\"\"never closed\n";
    let result = tracewright::instrument_file(source, Language::Python, &options);

    assert!(matches!(result, Err(ParseError::OracleUnavailable { .. })), "got {result:?}");
}

#[test]
fn unusable_cache_root_surfaces_as_cache_unavailable() {
    let cache_dir = tempfile::tempdir().unwrap();
    let not_a_dir = cache_dir.path().join("cache_root_is_a_file");
    std::fs::write(&not_a_dir, b"not a directory").unwrap();
    let options = options_with_cache_root(not_a_dir);

    let source = b"def add(a, b):\n    total = a + b\n    return total\n";
    let result = tracewright::instrument_file(source, Language::Python, &options);

    assert!(matches!(result, Err(ParseError::CacheUnavailable(_))), "got {result:?}");
}

#[test]
fn valid_source_clears_analysis_and_cache_setup_before_dispatch_is_reached() {
    // Not a full pipeline run (see module doc): this only proves the
    // analyze -> lessons -> cache wiring ahead of dispatch doesn't reject a
    // perfectly ordinary function before the sandbox even gets involved.
    // `ProcessSandboxExecutor::new()` itself only fails if `current_exe()`
    // can't be resolved, which doesn't happen in any supported environment,
    // so reaching that point without an `Err` is the bar this test sets.
    let cache_dir = tempfile::tempdir().unwrap();
    let options = options_with_cache_root(cache_dir.path().to_path_buf());

    let analysis = tracewright_analysis::analyze(
        Language::Python,
        b"def add(a, b):\n    total = a + b\n    return total\n",
        Some((&tracewright_core::StubOracle, std::time::Duration::from_millis(options.oracle_timeout_ms))),
    )
    .unwrap();
    assert_eq!(analysis.top_level_functions().count(), 1);

    let lessons = tracewright_lessons::load_optional(options.lessons_root.as_ref()).unwrap();
    assert_eq!(lessons.load(Language::Python).len(), 0);

    let cache = tracewright_cache::ScriptCache::open(&options.cache_root);
    assert!(cache.is_ok());
}
