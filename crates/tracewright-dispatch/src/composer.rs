//! File Composer (spec.md §4.C9): replace each original function span with
//! its instrumented text and stitch the result into a final file.
//!
//! Splices are applied in descending `start_offset` order so that an
//! earlier (lower-offset) replacement's byte range is never shifted by a
//! later one — the same descending-application discipline the splice-DSL
//! interpreter itself uses (spec.md §4.C3), just one level up, over whole
//! function spans instead of single insertions.

use std::collections::BTreeMap;

use tracewright_core::{FileCompositionResult, FunctionStatus, WorkItem, WorkResult};

/// `results[i]` must correspond to `work_items[i]` (spec.md §4.C8's
/// ordering guarantee) — only top-level functions are ever dispatched, so
/// both slices are expected to cover exactly the top-level functions of
/// one analysis (nested sites were already folded into their ancestor's
/// Transformer at C1/C2, so a nested `FunctionRecord` never gets its own
/// Work Item or its own entry in `per_function_statuses`).
pub fn compose(source: &[u8], work_items: &[WorkItem], results: &[WorkResult]) -> FileCompositionResult {
    debug_assert_eq!(work_items.len(), results.len());

    let mut statuses = BTreeMap::new();
    let mut replacements: Vec<(usize, usize, &[u8])> = Vec::new();

    for (item, result) in work_items.iter().zip(results.iter()) {
        match result {
            WorkResult::Success { instrumented_text, cached, .. } => {
                statuses.insert(item.function.name.clone(), FunctionStatus::Success { cached: *cached });
                // `item.function.indent_prefix` (the whitespace before
                // `start_offset`) is never prefixed onto `instrumented_text`:
                // that whitespace sits outside [start_offset, end_offset),
                // so it is never part of what this splice replaces and
                // already survives untouched in `output`. The spec.md §4.C9
                // "instrumented text lacks the original leading indentation"
                // case cannot arise under this span convention.
                replacements.push((item.function.start_offset, item.function.end_offset, instrumented_text.as_slice()));
            }
            WorkResult::Failure(reason) => {
                // Best-effort partial success (spec.md §4.C9): the
                // original bytes for this function are left untouched.
                statuses.insert(item.function.name.clone(), FunctionStatus::Failure { reason: reason.to_string() });
            }
        }
    }

    replacements.sort_by_key(|(start, _, _)| std::cmp::Reverse(*start));

    let mut output = source.to_vec();
    let mut replaced_count = 0;
    for (start, end, text) in replacements {
        if start > output.len() || end > output.len() || start > end {
            tracing::warn!(start, end, len = output.len(), "function span out of range of the current buffer, skipping");
            continue;
        }
        output.splice(start..end, text.iter().copied());
        replaced_count += 1;
    }

    FileCompositionResult { instrumented_source: output, replaced_count, per_function_statuses: statuses }
}
