//! Oracle prompt construction (spec.md §4.C3 oracle path, §4.C6 refactor
//! loop prompts). Budgeted and truncated the same way
//! `drift-context::generation::builder::ContextEngine::generate` weights
//! and truncates context sections to fit a token ceiling.

use std::collections::HashMap;

use tracewright_core::{FunctionRecord, Language, ProbePlan};

use crate::corpus::LessonNote;
use crate::token_budget::TokenBudget;
use crate::token_counter::TokenCounter;

const TRANSFORMER_CONTRACT: &str = "A Transformer must expose: apply(function_text, probe_plan) -> instrumented_text; \
supported_language() -> Language; and declare a Generated Test asserting the instrumented \
function behaves identically to the original for at least one representative input. \
Insertion line/column are 1-indexed and relative to the function text below: line 1 is its \
first line, header included. Return only the Transformer's source, no commentary.";

pub struct PromptBuilder {
    counter: TokenCounter,
}

impl PromptBuilder {
    pub fn new(model: &str) -> Self {
        Self { counter: TokenCounter::new(model) }
    }

    pub fn build_generation_prompt(
        &self,
        function: &FunctionRecord,
        plan: &ProbePlan,
        language: Language,
        lessons: &[LessonNote],
        max_tokens: usize,
    ) -> String {
        self.build(function, plan, language, lessons, max_tokens, None)
    }

    pub fn build_refactor_prompt(
        &self,
        function: &FunctionRecord,
        plan: &ProbePlan,
        language: Language,
        lessons: &[LessonNote],
        max_tokens: usize,
        validation_failure: &str,
    ) -> String {
        self.build(function, plan, language, lessons, max_tokens, Some(validation_failure))
    }

    fn build(
        &self,
        function: &FunctionRecord,
        plan: &ProbePlan,
        language: Language,
        lessons: &[LessonNote],
        max_tokens: usize,
        validation_failure: Option<&str>,
    ) -> String {
        let mut budget = TokenBudget::new(max_tokens);
        let mut weights = HashMap::new();
        weights.insert("contract", 1.0);
        weights.insert("function", 3.0);
        weights.insert("plan", 2.0);
        weights.insert("lessons", 2.0);
        budget.allocate_by_weights(&weights);

        let function_text = String::from_utf8_lossy(&function.span_bytes);
        let plan_text = describe_plan(plan);
        let lessons_text = self.render_lessons(lessons, budget.get_allocation("lessons"));

        let mut sections = vec![
            ("language".to_string(), language.to_string()),
            ("contract".to_string(), self.truncate(TRANSFORMER_CONTRACT, budget.get_allocation("contract"))),
            ("function".to_string(), self.truncate(&function_text, budget.get_allocation("function"))),
            ("probe_plan".to_string(), self.truncate(&plan_text, budget.get_allocation("plan"))),
        ];
        if !lessons_text.is_empty() {
            sections.push(("lessons".to_string(), lessons_text));
        }
        if let Some(failure) = validation_failure {
            sections.push(("validation_failure".to_string(), failure.to_string()));
        }

        sections.into_iter().map(|(name, content)| format!("## {name}\n\n{content}")).collect::<Vec<_>>().join("\n\n")
    }

    fn render_lessons(&self, lessons: &[LessonNote], allocation: usize) -> String {
        if allocation == 0 || lessons.is_empty() {
            return String::new();
        }
        let mut used = 0;
        let mut rendered = Vec::new();
        for lesson in lessons {
            let entry = format!("### {}\n{}", lesson.title, lesson.text);
            let cost = self.counter.count(&entry);
            if used + cost > allocation {
                break;
            }
            used += cost;
            rendered.push(entry);
        }
        rendered.join("\n\n")
    }

    /// Truncate `content` to approximately fit `max_tokens`, rounding down
    /// to the nearest UTF-8 char boundary and breaking on the preceding
    /// word when possible.
    fn truncate(&self, content: &str, max_tokens: usize) -> String {
        if max_tokens == 0 {
            return String::new();
        }
        let current = self.counter.count(content);
        if current <= max_tokens {
            return content.to_string();
        }

        let chars_per_token = content.len() as f64 / current.max(1) as f64;
        let mut target_chars = ((max_tokens as f64) * chars_per_token) as usize;
        target_chars = target_chars.min(content.len());
        while target_chars > 0 && !content.is_char_boundary(target_chars) {
            target_chars -= 1;
        }

        let truncated = &content[..target_chars];
        match truncated.rfind(' ') {
            Some(pos) => format!("{}...", &truncated[..pos]),
            None => format!("{truncated}..."),
        }
    }
}

fn describe_plan(plan: &ProbePlan) -> String {
    plan.iter()
        .map(|site| format!("{} at line {} column {} ({:?})", site.kind.tag(), site.line, site.column, site.anchor))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::FunctionId;

    fn sample_function() -> FunctionRecord {
        FunctionRecord {
            id: FunctionId(0),
            name: "f".into(),
            signature_text: "def f(a):".into(),
            param_names: vec!["a".into()],
            start_offset: 0,
            end_offset: 20,
            start_line: 1,
            end_line: 2,
            indent_prefix: "    ".into(),
            span_bytes: b"    return a\n".to_vec(),
            nested_in: None,
        }
    }

    #[test]
    fn generation_prompt_includes_contract_and_function_text() {
        let builder = PromptBuilder::new("gpt-4");
        let function = sample_function();
        let plan = ProbePlan::default();
        let prompt = builder.build_generation_prompt(&function, &plan, Language::Python, &[], 4000);
        assert!(prompt.contains("Transformer"));
        assert!(prompt.contains("return a"));
    }

    #[test]
    fn refactor_prompt_includes_validation_failure() {
        let builder = PromptBuilder::new("gpt-4");
        let function = sample_function();
        let plan = ProbePlan::default();
        let prompt = builder.build_refactor_prompt(&function, &plan, Language::Python, &[], 4000, "missing probe call");
        assert!(prompt.contains("missing probe call"));
    }

    #[test]
    fn tiny_budget_still_produces_valid_utf8_without_panicking() {
        let builder = PromptBuilder::new("gpt-4");
        let function = sample_function();
        let plan = ProbePlan::default();
        let _ = builder.build_generation_prompt(&function, &plan, Language::Python, &[], 8);
    }
}
