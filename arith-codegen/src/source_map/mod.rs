//! Source map synthesis from a trace tree.
//!
//! The tree is walked pre-order, root included, with these rules:
//! - a node whose first child starts where the node starts is *collapsed*:
//!   it emits nothing and its first child speaks for it;
//! - every other node with a source range maps source start to target start,
//!   naming the mapping after a single-letter identifier token;
//! - leaves whose source and generated text are non-empty and free of
//!   whitespace also map source end to target end.

pub mod payload;
pub mod vlq;

pub use payload::{inline_annotation, RawSourceMap, SourceMapBuilder};

use crate::ast::Position;
use crate::options::GenerateOptions;
use crate::trace::{TraceId, TraceTree};

/// One entry of the emitted map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub generated: Position,
    pub original: Position,
    pub source: String,
    pub name: Option<String>,
}

/// Collect the mappings of `tree` in traversal order.
pub fn synthesize(
    tree: &TraceTree,
    filename: &str,
    source_text: &str,
    generated: &str,
    options: &GenerateOptions,
) -> Vec<Mapping> {
    let mut mappings = Vec::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        stack.extend(node.children.iter().rev().copied());

        if is_collapsed(tree, id) {
            tracing::trace!(node = id.index(), "collapsed into first child");
            continue;
        }
        let Some(source) = &node.source else { continue };
        let Some(range) = source.range else { continue };

        let source_slice = source_text.get(source.offset..source.end).unwrap_or("");
        let name = if options.symbol_names {
            symbol_name(source_slice)
        } else {
            None
        };
        mappings.push(Mapping {
            generated: node.target.range.start,
            original: range.start,
            source: filename.to_string(),
            name,
        });

        let target_slice = tree.text(id, generated);
        if options.end_mappings
            && node.is_leaf()
            && is_solid(source_slice)
            && is_solid(target_slice)
        {
            mappings.push(Mapping {
                generated: node.target.range.end,
                original: range.end,
                source: filename.to_string(),
                name: None,
            });
        }
    }

    tracing::debug!(mappings = mappings.len(), "synthesized source mappings");
    mappings
}

/// A node is introduced by its first child when both start at the same offset.
pub fn is_collapsed(tree: &TraceTree, id: TraceId) -> bool {
    tree.first_child(id)
        .is_some_and(|child| child.target.offset == tree.node(id).target.offset)
}

/// Lower-cased token when `text` is exactly one letter or underscore.
fn symbol_name(text: &str) -> Option<String> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() || ch == '_' => {
            Some(ch.to_ascii_lowercase().to_string())
        }
        _ => None,
    }
}

fn is_solid(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(char::is_whitespace)
}

/// Synthetic filename for a source identifier: its last path segment.
pub fn filename_for(uri: &str) -> &str {
    match uri.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "module",
    }
}
