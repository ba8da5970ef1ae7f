//! Source Analyzer (spec.md §4.C1): structured tree-sitter strategy with an
//! oracle-backed fallback, producing Function Records and per-function raw
//! candidate probe sites. `crate::plan` turns the latter into canonical
//! `ProbePlan`s.

pub mod line_index;
mod oracle_strategy;
mod structured;
mod visitor;

use std::time::Duration;

use rustc_hash::FxHashMap;
use tracewright_core::{FunctionId, FunctionRecord, Language, Oracle, ParseError, ProbePlan};

use crate::grammar::grammar_for;
use crate::plan::build_probe_plan;

#[derive(Debug)]
pub struct AnalysisResult {
    pub functions: Vec<FunctionRecord>,
    pub plans: FxHashMap<FunctionId, ProbePlan>,
}

impl AnalysisResult {
    pub fn plan_for(&self, id: FunctionId) -> Option<&ProbePlan> {
        self.plans.get(&id)
    }

    pub fn top_level_functions(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.functions.iter().filter(|f| f.is_top_level())
    }
}

/// Analyze one source file. `oracle` is consulted only when the structured
/// strategy has no grammar for `language` or the source fails to parse
/// (spec.md §4.C1).
pub fn analyze(
    language: Language,
    source: &[u8],
    oracle: Option<(&dyn Oracle, Duration)>,
) -> Result<AnalysisResult, ParseError> {
    let structured_outcome = match grammar_for(language) {
        Some(grammar) => structured::analyze(grammar.as_ref(), source),
        None => Err(ParseError::UnsupportedLanguage { extension: language.short_id().to_string() }),
    };

    let raw = match structured_outcome {
        Ok(raw) => raw,
        Err(structured_err) => match oracle {
            Some((oracle, timeout)) => oracle_strategy::analyze(oracle, source, timeout)?,
            None => return Err(structured_err),
        },
    };

    let plans = raw
        .functions
        .iter()
        .map(|f| {
            let sites = raw.raw_sites.get(&f.id).cloned().unwrap_or_default();
            (f.id, build_probe_plan(f, sites))
        })
        .collect();

    Ok(AnalysisResult { functions: raw.functions, plans })
}
