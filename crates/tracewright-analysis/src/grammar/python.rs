use tracewright_core::Language;

use super::LanguageGrammar;

pub struct PythonGrammar;

impl LanguageGrammar for PythonGrammar {
    fn language(&self) -> Language {
        Language::Python
    }

    fn ts_language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &'static [&'static str] {
        &["function_definition"]
    }

    fn loop_kinds(&self) -> &'static [&'static str] {
        &["for_statement", "while_statement"]
    }

    fn conditional_kinds(&self) -> &'static [&'static str] {
        &["if_statement"]
    }

    fn try_kinds(&self) -> &'static [&'static str] {
        &["try_statement"]
    }

    fn except_kinds(&self) -> &'static [&'static str] {
        &["except_clause"]
    }

    fn return_kinds(&self) -> &'static [&'static str] {
        &["return_statement"]
    }

    fn assignment_kinds(&self) -> &'static [&'static str] {
        &["assignment", "augmented_assignment"]
    }

    fn call_kinds(&self) -> &'static [&'static str] {
        &["call"]
    }

    fn block_kinds(&self) -> &'static [&'static str] {
        &["block", "module"]
    }
}
