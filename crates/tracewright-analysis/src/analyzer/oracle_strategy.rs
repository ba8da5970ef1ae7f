//! Oracle-backed fallback Source Analyzer strategy (spec.md §4.C1: "an
//! oracle-backed strategy ... for languages without one, or when the
//! structured strategy fails"). Prompts the oracle for a JSON analysis of
//! the file and decodes it against this crate's own `ProbeSite` wire shape,
//! since the oracle transport itself is opaque and out of scope (spec.md §1).

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracewright_core::{FunctionId, FunctionRecord, Oracle, ParseError, ProbeSite};

use super::line_index::LineIndex;
use super::structured::StructuredAnalysis;

#[derive(Debug, Deserialize)]
struct OracleFunctionAnalysis {
    name: String,
    start_offset: usize,
    end_offset: usize,
    #[serde(default)]
    param_names: Vec<String>,
    #[serde(default)]
    sites: Vec<ProbeSite>,
}

#[derive(Debug, Deserialize)]
struct OracleAnalysisResponse {
    functions: Vec<OracleFunctionAnalysis>,
}

const ANALYSIS_PROMPT_PREAMBLE: &str = "\
Analyze the following source file and return a JSON object of the shape \
{\"functions\": [{\"name\": str, \"start_offset\": uint, \"end_offset\": uint, \
\"param_names\": [str], \"sites\": [ProbeSite]}]}. start_offset/end_offset are \
0-indexed byte offsets into the file, spanning the whole function definition \
including its header. Each ProbeSite's line/column are 1-indexed and absolute \
within the file, matching the file's own line numbering (not relative to the \
function); they will be re-based before use. Return only the JSON object, no \
commentary.\n\n";

pub fn analyze(
    oracle: &dyn Oracle,
    source: &[u8],
    timeout: std::time::Duration,
) -> Result<StructuredAnalysis, ParseError> {
    let text = String::from_utf8_lossy(source);
    let prompt = format!("{ANALYSIS_PROMPT_PREAMBLE}{text}");

    let response = oracle
        .ask(&prompt, timeout)
        .map_err(|e| ParseError::OracleUnavailable { message: e.to_string() })?;

    let json = extract_json_block(&response);
    let parsed: OracleAnalysisResponse = serde_json::from_str(json)
        .map_err(|e| ParseError::MalformedOracleResponse { message: e.to_string() })?;

    let line_index = LineIndex::new(source);
    let mut functions = Vec::new();
    let mut raw_sites = FxHashMap::default();

    for (idx, f) in parsed.functions.into_iter().enumerate() {
        let id = FunctionId(idx as u32);
        let start_offset = f.start_offset.min(source.len());
        let end_offset = f.end_offset.min(source.len()).max(start_offset);
        let span_bytes = source[start_offset..end_offset].to_vec();
        let signature_text = String::from_utf8_lossy(&span_bytes)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();

        functions.push(FunctionRecord {
            id,
            name: f.name,
            signature_text,
            param_names: f.param_names,
            start_offset,
            end_offset,
            start_line: line_index.line_of(start_offset),
            end_line: line_index.line_of(end_offset.saturating_sub(1).max(start_offset)),
            indent_prefix: line_index.indent_prefix(source, start_offset),
            span_bytes,
            nested_in: None,
        });
        raw_sites.insert(id, f.sites);
    }

    Ok(StructuredAnalysis { functions, raw_sites })
}

/// Oracles are prompted to return bare JSON but frequently wrap it in a
/// fenced code block anyway; unwrap one if present (spec.md §6.4 convention).
fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }
    trimmed
}
