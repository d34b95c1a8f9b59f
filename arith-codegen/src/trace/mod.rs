//! Provenance tree linking spans of generated text back to source regions.
//!
//! Nodes live in an arena and are addressed by [`TraceId`]. The tree is
//! built by a [`TracedWriter`] while text is being emitted and is dropped at
//! the end of a generation call.

pub mod writer;

pub use writer::{TraceBuilder, TracedWriter};

use crate::ast::{PositionRange, SourceRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(usize);

impl TraceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A span of the generated text: byte offsets `[offset, end)` and the
/// matching line/character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRegion {
    pub offset: usize,
    pub end: usize,
    pub range: PositionRange,
}

impl TargetRegion {
    pub fn contains(&self, other: &TargetRegion) -> bool {
        self.offset <= other.offset && other.end <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceNode {
    /// `None` only for the synthetic root spanning the whole output.
    pub source: Option<SourceRegion>,
    pub target: TargetRegion,
    pub children: Vec<TraceId>,
}

impl TraceNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceTree {
    nodes: Vec<TraceNode>,
}

impl TraceTree {
    pub(crate) fn from_nodes(nodes: Vec<TraceNode>) -> Self {
        Self { nodes }
    }

    pub fn root(&self) -> TraceId {
        TraceId(0)
    }

    pub fn node(&self, id: TraceId) -> &TraceNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TraceId> + '_ {
        (0..self.nodes.len()).map(TraceId)
    }

    pub fn first_child(&self, id: TraceId) -> Option<&TraceNode> {
        self.node(id).children.first().map(|child| self.node(*child))
    }

    /// The text a node contributed, sliced out of the generated output.
    pub fn text<'a>(&self, id: TraceId, generated: &'a str) -> &'a str {
        let target = &self.node(id).target;
        generated.get(target.offset..target.end).unwrap_or("")
    }
}
