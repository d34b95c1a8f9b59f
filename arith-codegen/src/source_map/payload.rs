use super::{vlq, Mapping};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Revision 3 source map, field order as emitted by common tooling.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: u8,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources_content: Vec<String>,
}

/// Accumulates mappings and source contents into a [`RawSourceMap`].
#[derive(Debug, Clone, Default)]
pub struct SourceMapBuilder {
    file: String,
    sources: Vec<String>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    mappings: Vec<Mapping>,
}

impl SourceMapBuilder {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn set_source_content(&mut self, source: &str, content: impl Into<String>) {
        let index = self.source_index(source);
        self.sources_content[index] = Some(content.into());
    }

    pub fn add_mapping(&mut self, mapping: Mapping) {
        self.source_index(&mapping.source);
        if let Some(name) = &mapping.name {
            if !self.names.contains(name) {
                self.names.push(name.clone());
            }
        }
        self.mappings.push(mapping);
    }

    pub fn build(&self) -> RawSourceMap {
        let sources_content = if self.sources_content.iter().any(Option::is_some) {
            self.sources_content
                .iter()
                .map(|content| content.clone().unwrap_or_default())
                .collect()
        } else {
            Vec::new()
        };
        RawSourceMap {
            version: 3,
            sources: self.sources.clone(),
            names: self.names.clone(),
            mappings: self.serialize_mappings(),
            file: self.file.clone(),
            sources_content,
        }
    }

    fn source_index(&mut self, source: &str) -> usize {
        match self.sources.iter().position(|s| s == source) {
            Some(index) => index,
            None => {
                self.sources.push(source.to_string());
                self.sources_content.push(None);
                self.sources.len() - 1
            }
        }
    }

    /// Encode the mappings sorted by generated position. Each segment is
    /// delta-encoded against the previous one; exact duplicates are dropped.
    fn serialize_mappings(&self) -> String {
        let mut sorted: Vec<&Mapping> = self.mappings.iter().collect();
        sorted.sort_by(|a, b| compare_by_generated(a, b));

        let mut out = String::new();
        let mut previous_line = 0u32;
        let mut previous_column = 0i64;
        let mut previous_source = 0i64;
        let mut previous_original_line = 0i64;
        let mut previous_original_column = 0i64;
        let mut previous_name = 0i64;

        for (i, mapping) in sorted.iter().enumerate() {
            if mapping.generated.line != previous_line {
                previous_column = 0;
                while mapping.generated.line != previous_line {
                    out.push(';');
                    previous_line += 1;
                }
            } else if i > 0 {
                if compare_by_generated(mapping, sorted[i - 1]) == Ordering::Equal {
                    continue;
                }
                out.push(',');
            }

            let column = i64::from(mapping.generated.character);
            vlq::encode(column - previous_column, &mut out);
            previous_column = column;

            let source = self
                .sources
                .iter()
                .position(|s| *s == mapping.source)
                .unwrap_or(0) as i64;
            vlq::encode(source - previous_source, &mut out);
            previous_source = source;

            let original_line = i64::from(mapping.original.line);
            vlq::encode(original_line - previous_original_line, &mut out);
            previous_original_line = original_line;

            let original_column = i64::from(mapping.original.character);
            vlq::encode(original_column - previous_original_column, &mut out);
            previous_original_column = original_column;

            if let Some(name) = &mapping.name {
                let index = self.names.iter().position(|n| n == name).unwrap_or(0) as i64;
                vlq::encode(index - previous_name, &mut out);
                previous_name = index;
            }
        }
        out
    }
}

fn compare_by_generated(a: &Mapping, b: &Mapping) -> Ordering {
    a.generated
        .cmp(&b.generated)
        .then_with(|| a.source.cmp(&b.source))
        .then_with(|| a.original.cmp(&b.original))
        .then_with(|| a.name.cmp(&b.name))
}

/// Trailing comment embedding `json` as a base64 data URI.
pub fn inline_annotation(json: &str) -> String {
    format!(
        "//# sourceMappingURL=data:application/json;charset=utf-8;base64,{}",
        BASE64.encode(json)
    )
}
