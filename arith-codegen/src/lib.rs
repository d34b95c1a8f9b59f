//! Code generator for arithmetics modules.
//!
//! A validated module is lowered into one anonymous, zero-argument script
//! function that returns the value of the last evaluated statement. The
//! lowering records where every generated span came from, and that trace is
//! turned into a source map embedded at the end of the output.

pub mod ast;
pub mod codegen;
pub mod frontend;
pub mod options;
pub mod source_map;
pub mod trace;

pub use ast::Document;
pub use options::GenerateOptions;
pub use source_map::{Mapping, RawSourceMap};

use source_map::SourceMapBuilder;
use thiserror::Error;

/// Source-map content used when the document carries no source text.
pub const MISSING_SOURCE_TEXT: &str = "<Source text not available>";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid document: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Expression nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("Failed to serialize source map: {0}")]
    SourceMap(#[source] serde_json::Error),
}

/// Output of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Script text, followed by the inline source map annotation when enabled.
    pub code: String,
    /// Mappings in trace traversal order.
    pub mappings: Vec<Mapping>,
    pub source_map: Option<RawSourceMap>,
}

/// Generate script text for `document`, identified by `uri`.
pub fn generate(
    uri: &str,
    document: &Document,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    let (mut code, trace) = codegen::lower(&document.module, options)?;

    let filename = source_map::filename_for(uri);
    let source_text = document.source_text.as_deref().unwrap_or_default();
    let mappings = source_map::synthesize(&trace, filename, source_text, &code, options);

    let mut builder = SourceMapBuilder::new(format!("{filename}.js"));
    builder.set_source_content(
        filename,
        document.source_text.as_deref().unwrap_or(MISSING_SOURCE_TEXT),
    );
    for mapping in &mappings {
        builder.add_mapping(mapping.clone());
    }
    let raw = builder.build();

    let source_map = if options.source_map {
        let json = serde_json::to_string(&raw).map_err(GenerateError::SourceMap)?;
        code.push_str("\n\n");
        code.push_str(&source_map::inline_annotation(&json));
        Some(raw)
    } else {
        None
    };

    Ok(Generated {
        code,
        mappings,
        source_map,
    })
}

/// Generate from a serialized document (see [`frontend::parse_document`]).
pub fn generate_serialized(
    uri: &str,
    content: &str,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    let document = frontend::parse_document_with_limit(content, options.max_depth)?;
    generate(uri, &document, options)
}
