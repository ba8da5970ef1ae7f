use tracewright_core::{Language, ProbeKind};

use super::Synthesizer;

/// Go has no exception-handling construct in this core's scope, so the
/// Source Analyzer never emits `exc_*` sites for Go from the structured
/// strategy — but an oracle-backed analysis of a Go file could still
/// surface one (e.g. `panic`/`recover` treated as exception-like by a
/// future oracle). Declaring them unsupported here keeps that case routed
/// to the oracle generator rather than silently mis-rendering a call Go
/// has no runtime convention for.
pub struct GoSynthesizer;

impl Synthesizer for GoSynthesizer {
    fn language(&self) -> Language {
        Language::Go
    }

    fn supports(&self, kind: &ProbeKind) -> bool {
        !matches!(kind, ProbeKind::ExcEnter | ProbeKind::ExcCaught { .. } | ProbeKind::ExcExit)
    }
}
