//! Per-language node-kind tables (spec.md §6.5's `LanguageAnalyzer plug
//! interface`, the structured-strategy half of it). Generalizes
//! `drift-analysis`'s per-language tree-sitter wiring: instead of one
//! hand-written parser struct per language, a single generic visitor
//! (`crate::analyzer::visitor`) is driven by a small table of node-kind
//! names each language's grammar uses for the constructs spec.md §3 and
//! §4.C1 care about.

mod go;
mod javascript;
mod python;
mod typescript;

pub use go::GoGrammar;
pub use javascript::JavaScriptGrammar;
pub use python::PythonGrammar;
pub use typescript::TypeScriptGrammar;

use tracewright_core::Language;

/// The node-kind vocabulary a tree-sitter grammar uses for the handful of
/// constructs the Source Analyzer instruments. Node kinds are tree-sitter
/// grammar node type names (`node.kind()`), not spec.md probe kinds.
pub trait LanguageGrammar: Send + Sync {
    fn language(&self) -> Language;
    fn ts_language(&self) -> tree_sitter::Language;

    /// Function-like definitions: plain functions, methods, nested defs.
    fn function_kinds(&self) -> &'static [&'static str];
    /// `for`/`while`-style loops.
    fn loop_kinds(&self) -> &'static [&'static str];
    /// `if`-style conditionals (the top-level node; elif/else are reached
    /// via `branch_kinds`/nested conditionals of the same kind).
    fn conditional_kinds(&self) -> &'static [&'static str];
    /// `try`/exception-protected blocks. Empty when the language has no
    /// exception construct in scope (e.g. Go).
    fn try_kinds(&self) -> &'static [&'static str];
    /// Handler clauses within a try construct (`except_clause`, `catch_clause`).
    fn except_kinds(&self) -> &'static [&'static str];
    fn return_kinds(&self) -> &'static [&'static str];
    /// Plain assignment / variable-declarator nodes.
    fn assignment_kinds(&self) -> &'static [&'static str];
    /// Call-expression node kind for this language.
    fn call_kinds(&self) -> &'static [&'static str];
    /// Node kinds that introduce a new lexical scope boundary for the
    /// "function-local" variable-change policy (function kinds always do).
    fn block_kinds(&self) -> &'static [&'static str];
}

/// Resolve the structured-strategy grammar for a language, if we have one.
pub fn grammar_for(language: Language) -> Option<Box<dyn LanguageGrammar>> {
    match language {
        Language::Python => Some(Box::new(PythonGrammar)),
        Language::JavaScript => Some(Box::new(JavaScriptGrammar)),
        Language::TypeScript => Some(Box::new(TypeScriptGrammar)),
        Language::Go => Some(Box::new(GoGrammar)),
    }
}
