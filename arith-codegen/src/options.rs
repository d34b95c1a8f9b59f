use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    GenerateOptions::DEFAULT_MAX_DEPTH
}

/// Options for [`generate`](crate::generate). Every field is optional when
/// deserialized.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Append the inline `sourceMappingURL` annotation (default: true).
    #[serde(default = "default_true")]
    pub source_map: bool,
    /// Attach single-letter identifiers as symbol names (default: true).
    #[serde(default = "default_true")]
    pub symbol_names: bool,
    /// Also map the end of whitespace-free leaf tokens (default: true).
    #[serde(default = "default_true")]
    pub end_mappings: bool,
    /// Deepest expression nesting accepted before giving up (default: 256).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl GenerateOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            source_map: true,
            symbol_names: true,
            end_mappings: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
