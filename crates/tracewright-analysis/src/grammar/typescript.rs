use tracewright_core::Language;

use super::LanguageGrammar;

/// TypeScript's grammar is a strict superset of JavaScript's for every
/// construct the Source Analyzer cares about (spec.md §3/§4.C1); only the
/// `tree_sitter::Language` differs.
pub struct TypeScriptGrammar;

impl LanguageGrammar for TypeScriptGrammar {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }

    fn function_kinds(&self) -> &'static [&'static str] {
        &["function_declaration", "method_definition"]
    }

    fn loop_kinds(&self) -> &'static [&'static str] {
        &["for_statement", "for_in_statement", "while_statement", "do_statement"]
    }

    fn conditional_kinds(&self) -> &'static [&'static str] {
        &["if_statement"]
    }

    fn try_kinds(&self) -> &'static [&'static str] {
        &["try_statement"]
    }

    fn except_kinds(&self) -> &'static [&'static str] {
        &["catch_clause"]
    }

    fn return_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn assignment_kinds(&self) -> &'static [&'static str] {
        &["variable_declarator", "assignment_expression"]
    }

    fn call_kinds(&self) -> &'static [&'static str] {
        &["call_expression"]
    }

    fn block_kinds(&self) -> &'static [&'static str] {
        &["statement_block", "program"]
    }
}
