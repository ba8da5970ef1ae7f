use tracewright_core::{Language, ProbeKind};

use super::Synthesizer;

pub struct PythonSynthesizer;

impl Synthesizer for PythonSynthesizer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn supports(&self, _kind: &ProbeKind) -> bool {
        true
    }
}
