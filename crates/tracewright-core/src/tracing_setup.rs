//! Ambient logging init, grounded on the teacher's use of `tracing` +
//! `tracing-subscriber`'s `EnvFilter` for scan/pipeline instrumentation.
//! Out of scope (spec.md §1) is a full logging *policy*; this is just the
//! one-line bootstrap a host application calls once.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber reading `RUST_LOG` (default
/// `info`). Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
