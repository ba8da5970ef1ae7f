use tracewright_core::{Language, ProbeKind};

use super::Synthesizer;

pub struct JavaScriptSynthesizer;

impl Synthesizer for JavaScriptSynthesizer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn supports(&self, _kind: &ProbeKind) -> bool {
        true
    }
}
