//! # tracewright-analysis
//!
//! Source Analyzer (spec.md §4.C1), Probe Plan Builder (§4.C2), and
//! Fingerprint/Normalization (§4.C10). Generalizes `drift-analysis`'s
//! tree-sitter-driven, per-language-grammar-table architecture: one
//! generic AST visitor per construct family instead of a hand-rolled
//! parser per language.

pub mod analyzer;
pub mod cache;
pub mod fingerprint;
pub mod grammar;
pub mod plan;

pub use analyzer::{analyze, AnalysisResult};
pub use cache::AnalysisCache;
