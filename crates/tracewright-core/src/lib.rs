//! # tracewright-core
//!
//! Foundation crate for TraceWright's instrumentation core.
//! Defines the data model (§3), error taxonomy (§7), the cancellation
//! token (§5), the oracle seam (§6.4), and ambient tracing setup.
//! Every other crate in the workspace depends on this one.

pub mod cancellation;
pub mod errors;
pub mod hashing;
pub mod oracle;
pub mod sandbox;
pub mod tracing_setup;
pub mod types;

pub use cancellation::CancellationToken;
pub use errors::*;
pub use oracle::{Oracle, OracleError, StubOracle};
pub use sandbox::{SandboxExecutor, SandboxOutcome};
pub use tracing_setup::init_tracing;
pub use types::*;
