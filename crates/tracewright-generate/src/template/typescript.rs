use tracewright_core::{Language, ProbeKind};

use super::Synthesizer;

/// TypeScript's template coverage matches JavaScript's exactly — the probe
/// call convention doesn't involve types.
pub struct TypeScriptSynthesizer;

impl Synthesizer for TypeScriptSynthesizer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn supports(&self, _kind: &ProbeKind) -> bool {
        true
    }
}
