//! `ScriptCache` — spec.md §4.C4's two-layer filesystem cache.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracewright_core::{CacheBodies, CacheEntry, CacheError, Fingerprint, GeneratedTest, Provenance, Transformer, ValidationStatus};

use crate::index::IndexLock;
use crate::{body, layout};

pub struct ScriptCache {
    root: PathBuf,
    index: IndexLock,
}

impl ScriptCache {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        let index = IndexLock::open(&root)?;
        Ok(Self { root, index })
    }

    /// `lookup(fingerprint) -> Option<CacheEntry>`, extended to also return
    /// the bodies a caller needs to run the Transformer (spec.md §4.C4).
    /// A present index entry whose body file is momentarily absent is
    /// treated as a miss, never an error (I2 / P8).
    pub fn lookup(&mut self, fingerprint: Fingerprint) -> Result<Option<(CacheEntry, CacheBodies)>, CacheError> {
        let hex = fingerprint.to_hex();
        let index = self.index.read()?;
        let Some(entry) = index.entries.get(&hex).cloned() else {
            return Ok(None);
        };

        let prog_path = layout::store_dir(&self.root, entry.language)
            .join(layout::body_file_name(&entry.function_name, fingerprint, "prog"));
        let tst_path = layout::tests_dir(&self.root, entry.language)
            .join(layout::body_file_name(&entry.function_name, fingerprint, "tst"));

        let (Some(transformer), Some(test)) = (body::read_transformer(&prog_path)?, body::read_test(&tst_path)?) else {
            tracing::warn!(fingerprint = %hex, "cache index entry present but body file missing, treating as a miss");
            return Ok(None);
        };

        if transformer.function_name != entry.function_name || transformer.language != entry.language {
            tracing::warn!(fingerprint = %hex, "cache body identity mismatch, treating as a miss");
            return Ok(None);
        }

        let updated_entry = self.index.mutate(|index| {
            if let Some(e) = index.entries.get_mut(&hex) {
                e.hit_count += 1;
                e.last_used_at_unix_ms = now_unix_ms();
            }
        })?;
        let entry = updated_entry.entries.get(&hex).cloned().unwrap_or(entry);

        Ok(Some((entry, CacheBodies { transformer, test })))
    }

    /// `store(fingerprint, transformer, test, provenance) -> CacheEntry`.
    /// Body files land first (so a reader never sees an index entry ahead
    /// of its bodies), then the index is updated under its exclusive lock.
    pub fn store(
        &mut self,
        fingerprint: Fingerprint,
        transformer: &Transformer,
        test: &GeneratedTest,
        provenance: Provenance,
    ) -> Result<CacheEntry, CacheError> {
        let prog_name = layout::body_file_name(&transformer.function_name, fingerprint, "prog");
        let tst_name = layout::body_file_name(&transformer.function_name, fingerprint, "tst");
        body::write_transformer(&layout::store_dir(&self.root, transformer.language), &prog_name, transformer)?;
        body::write_test(&layout::tests_dir(&self.root, transformer.language), &tst_name, test)?;

        let hex = fingerprint.to_hex();
        let now = now_unix_ms();
        let entry = CacheEntry {
            fingerprint_hex: hex.clone(),
            language: transformer.language,
            function_name: transformer.function_name.clone(),
            provenance,
            created_at_unix_ms: now,
            last_used_at_unix_ms: now,
            validation_status: ValidationStatus::Valid,
            hit_count: 0,
        };

        self.index.mutate(|index| {
            index.entries.insert(hex.clone(), entry.clone());
        })?;

        Ok(entry)
    }
}

pub fn now_unix_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}
