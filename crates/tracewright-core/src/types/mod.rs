pub mod cache_entry;
pub mod composition;
pub mod function;
pub mod language;
pub mod options;
pub mod probe;
pub mod source;
pub mod transformer;
pub mod work;

pub use cache_entry::{CacheBodies, CacheEntry, Fingerprint, ValidationStatus};
pub use composition::{FileCompositionResult, FunctionStatus};
pub use function::{FunctionId, FunctionRecord};
pub use language::Language;
pub use options::Options;
pub use probe::{Anchor, ProbeKind, ProbePlan, ProbeSite};
pub use source::SourceFile;
pub use transformer::{GeneratedTest, GeneratorMode, Insertion, Provenance, Transformer};
pub use work::{FailureReason, WorkItem, WorkResult};
