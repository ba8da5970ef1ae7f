use tracewright_core::Language;

use super::LanguageGrammar;

pub struct GoGrammar;

impl LanguageGrammar for GoGrammar {
    fn language(&self) -> Language {
        Language::Go
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &'static [&'static str] {
        &["function_declaration", "method_declaration"]
    }

    fn loop_kinds(&self) -> &'static [&'static str] {
        &["for_statement"]
    }

    fn conditional_kinds(&self) -> &'static [&'static str] {
        &["if_statement"]
    }

    // Go has no try/except in scope for this implementation (SPEC_FULL.md
    // §4.C3: Go's template generator has no applicable exception-handling
    // construct to instrument).
    fn try_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn except_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn return_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn assignment_kinds(&self) -> &'static [&'static str] {
        &["short_var_declaration", "assignment_statement"]
    }

    fn call_kinds(&self) -> &'static [&'static str] {
        &["call_expression"]
    }

    fn block_kinds(&self) -> &'static [&'static str] {
        &["block", "source_file"]
    }
}
