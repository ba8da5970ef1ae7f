//! # tracewright-dispatch
//!
//! Parallel Dispatcher (spec.md §4.C8) and File Composer (§4.C9): the two
//! components that turn a batch of per-function Work Items into a single
//! instrumented file.

pub mod composer;
pub mod dispatcher;

pub use composer::compose;
pub use dispatcher::{run_batch, DispatchConfig};
