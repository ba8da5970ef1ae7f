//! # tracewright-sandbox
//!
//! Sandboxed Executor (spec.md §4.C7): a self-reexec child process
//! interprets a Transformer's splice program in isolation. Also hosts the
//! `__run_splice__` worker entry point the root crate's binary dispatches
//! to.

pub mod executor;
pub mod interpreter;
pub mod worker;

pub use executor::{ProcessSandboxExecutor, SPLICE_MARKER};
