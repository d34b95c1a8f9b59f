use serde::{Deserialize, Serialize};

// ── Snapshot (return type) ───────────────────────────────────────────

/// Complete generation result returned by `generate`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerateSnapshot {
    pub success: bool,
    pub error: Option<String>,
    /// Script text, including the inline source map when enabled.
    pub code: Option<String>,
    pub mappings: Vec<WasmMapping>,
}

impl GenerateSnapshot {
    pub fn error(msg: String) -> Self {
        Self {
            success: false,
            error: Some(msg),
            code: None,
            mappings: Vec::new(),
        }
    }
}

// ── Sub-types ────────────────────────────────────────────────────────

/// One source mapping, 0-based on both sides.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WasmMapping {
    pub generated_line: u32,
    pub generated_col: u32,
    pub original_line: u32,
    pub original_col: u32,
    pub name: Option<String>,
}
