//! # tracewright-cache
//!
//! Script Cache (spec.md §4.C4): a content-addressed, two-layer
//! filesystem store for Transformers and their Generated Tests, keyed by
//! `Fingerprint` (§4.C10).

pub mod body;
pub mod index;
pub mod layout;
pub mod prune;
pub mod store;

pub use prune::{prune_older_than, PruneReport};
pub use store::ScriptCache;

#[cfg(test)]
mod tests {
    use super::*;
    use tracewright_core::{GeneratedTest, GeneratorMode, Insertion, Anchor, Language, Provenance, Transformer};

    fn fp(byte: u8) -> tracewright_core::Fingerprint {
        tracewright_core::Fingerprint([byte; 16])
    }

    fn transformer() -> Transformer {
        Transformer {
            language: Language::Python,
            function_name: "compute".into(),
            insertions: vec![Insertion {
                line: 1,
                column: 1,
                anchor: Anchor::After,
                probe_text: "__trace_probe__(\"x\")".into(),
                kind_tag: "func_exit".to_string(),
            }],
            provenance: Provenance {
                generator_mode: GeneratorMode::Template,
                oracle_model: None,
                lesson_corpus_version: "v1".into(),
                refactor_attempts: 0,
            },
        }
    }

    fn test_fixture() -> GeneratedTest {
        GeneratedTest { synthetic_input: b"return 1\n".to_vec(), expected_probe_texts: vec![], expected_token_sequence: vec![] }
    }

    #[test]
    fn store_then_lookup_round_trips_the_transformer() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ScriptCache::open(dir.path()).unwrap();
        let fingerprint = fp(1);
        let provenance = transformer().provenance;
        let entry = cache.store(fingerprint, &transformer(), &test_fixture(), provenance).unwrap();
        assert_eq!(entry.hit_count, 0);

        let (entry, bodies) = cache.lookup(fingerprint).unwrap().expect("should hit");
        assert_eq!(entry.hit_count, 1);
        assert_eq!(bodies.transformer.function_name, "compute");
    }

    #[test]
    fn lookup_on_a_cold_cache_is_a_miss_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ScriptCache::open(dir.path()).unwrap();
        assert!(cache.lookup(fp(9)).unwrap().is_none());
    }

    #[test]
    fn missing_body_file_is_treated_as_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ScriptCache::open(dir.path()).unwrap();
        let fingerprint = fp(2);
        let provenance = transformer().provenance;
        cache.store(fingerprint, &transformer(), &test_fixture(), provenance).unwrap();

        let prog_path = layout::store_dir(dir.path(), Language::Python)
            .join(layout::body_file_name("compute", fingerprint, "prog"));
        std::fs::remove_file(prog_path).unwrap();

        assert!(cache.lookup(fingerprint).unwrap().is_none());
    }

    #[test]
    fn prune_removes_entries_older_than_the_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ScriptCache::open(dir.path()).unwrap();
        let fingerprint = fp(3);
        let provenance = transformer().provenance;
        cache.store(fingerprint, &transformer(), &test_fixture(), provenance).unwrap();
        drop(cache);

        let report = prune_older_than(dir.path(), std::time::Duration::from_secs(0)).unwrap();
        assert_eq!(report.entries_removed, 1);

        let mut cache = ScriptCache::open(dir.path()).unwrap();
        assert!(cache.lookup(fingerprint).unwrap().is_none());
    }
}
