//! `prune_older_than` — an explicit, external-operation-only eviction
//! helper (spec.md §4.C4: "none automatic; an external operation prunes
//! by `last_used_at`"), grounded on `drift-core::workspace::gc`'s
//! sweep-by-timestamp shape. Never called from `instrument_file`.

use std::time::Duration;

use tracewright_core::CacheError;

use crate::index::IndexLock;
use crate::layout;
use crate::store::now_unix_ms;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PruneReport {
    pub entries_removed: u64,
    pub body_files_removed: u64,
}

pub fn prune_older_than(root: &std::path::Path, max_age: Duration) -> Result<PruneReport, CacheError> {
    let mut index_lock = IndexLock::open(root)?;
    let mut report = PruneReport::default();
    let cutoff = now_unix_ms().saturating_sub(max_age.as_millis() as u64);

    let mut to_remove = Vec::new();
    index_lock.mutate(|index| {
        for (fingerprint_hex, entry) in index.entries.iter() {
            if entry.last_used_at_unix_ms < cutoff {
                to_remove.push((fingerprint_hex.clone(), entry.clone()));
            }
        }
        for (fingerprint_hex, _) in &to_remove {
            index.entries.remove(fingerprint_hex);
        }
    })?;

    for (fingerprint_hex, entry) in &to_remove {
        report.entries_removed += 1;
        let short = &fingerprint_hex[..8.min(fingerprint_hex.len())];
        let prog = layout::store_dir(root, entry.language).join(format!(
            "{}_{}.prog",
            sanitize_for_glob(&entry.function_name),
            short
        ));
        let tst = layout::tests_dir(root, entry.language).join(format!(
            "{}_{}.tst",
            sanitize_for_glob(&entry.function_name),
            short
        ));
        if std::fs::remove_file(&prog).is_ok() {
            report.body_files_removed += 1;
        }
        if std::fs::remove_file(&tst).is_ok() {
            report.body_files_removed += 1;
        }
    }

    Ok(report)
}

fn sanitize_for_glob(name: &str) -> String {
    name.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}
