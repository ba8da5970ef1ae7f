//! Language identifiers and their plug-in routing.

use std::fmt;

/// A language this core has a structured analyzer/composer for.
///
/// Other languages are still accepted at the `instrument_file` boundary —
/// see `tracewright-analysis`'s oracle fallback strategy — but only these
/// four get the template (tree-sitter) path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Go,
}

impl Language {
    /// Detect a language from a file extension (without the leading dot).
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext?.to_ascii_lowercase().as_str() {
            "py" | "pyi" => Some(Self::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    /// Short identifier used in cache paths and fingerprints (`py`, `js`, `ts`, `go`).
    pub fn short_id(&self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
            Self::Go => "go",
        }
    }

    pub fn from_short_id(id: &str) -> Option<Self> {
        match id {
            "py" => Some(Self::Python),
            "js" => Some(Self::JavaScript),
            "ts" => Some(Self::TypeScript),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    pub const ALL: [Language; 4] = [Self::Python, Self::JavaScript, Self::TypeScript, Self::Go];
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_id())
    }
}
