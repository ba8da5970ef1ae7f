//! In-memory analysis cache: Moka TinyLFU, keyed by (content_hash, language).
//! Purely an in-process speedup for repeated `analyze()` calls against the
//! same bytes within one run — distinct from the on-disk Script Cache
//! (`tracewright-cache`), which addresses generated Transformers, not raw
//! analysis results.

use std::sync::Arc;

use moka::sync::Cache;
use tracewright_core::Language;

use crate::analyzer::AnalysisResult;

/// Cache key combining content hash with language discriminant, preventing
/// cross-language collisions on identical bytes.
type CacheKey = (u64, std::mem::Discriminant<Language>);

fn make_key(content_hash: u64, language: Language) -> CacheKey {
    (content_hash, std::mem::discriminant(&language))
}

pub struct AnalysisCache {
    inner: Cache<CacheKey, Arc<AnalysisResult>>,
}

impl AnalysisCache {
    pub fn new(capacity: u64) -> Self {
        Self { inner: Cache::new(capacity) }
    }

    pub fn get(&self, content_hash: u64, language: Language) -> Option<Arc<AnalysisResult>> {
        self.inner.get(&make_key(content_hash, language))
    }

    pub fn insert(&self, content_hash: u64, language: Language, result: Arc<AnalysisResult>) {
        self.inner.insert(make_key(content_hash, language), result);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub fn invalidate(&self, content_hash: u64, language: Language) {
        self.inner.invalidate(&make_key(content_hash, language));
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}
