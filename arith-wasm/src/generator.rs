use arith_codegen::{generate_serialized, GenerateOptions, Mapping};
use std::fmt::Display;

use crate::types::*;

pub fn generate_snapshot_internal(
    uri: &str,
    document_json: &str,
    opts: &GenerateOptions,
) -> GenerateSnapshot {
    let generated = match generate_serialized(uri, document_json, opts) {
        Ok(generated) => generated,
        Err(e) => return GenerateSnapshot::error(e.to_string()),
    };

    GenerateSnapshot {
        success: true,
        error: None,
        code: Some(generated.code),
        mappings: generated.mappings.iter().map(map_mapping).collect(),
    }
}

/// Options passed by the host, or the defaults when they could not be read.
pub fn options_or_default<E: Display>(parsed: Result<GenerateOptions, E>) -> GenerateOptions {
    parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring malformed generate options, using defaults");
        GenerateOptions::default()
    })
}

fn map_mapping(m: &Mapping) -> WasmMapping {
    WasmMapping {
        generated_line: m.generated.line,
        generated_col: m.generated.character,
        original_line: m.original.line,
        original_col: m.original.character,
        name: m.name.clone(),
    }
}
