use super::{TargetRegion, TraceId, TraceNode, TraceTree};
use crate::ast::{Position, PositionRange, SourceRegion};

/// Append-only text buffer that records a [`TraceNode`] for every traced
/// scope opened while writing.
///
/// Nodes are opened and closed in stack order, so a node's target region
/// always contains those of its descendants and siblings never overlap.
#[derive(Debug)]
pub struct TracedWriter {
    text: String,
    position: Position,
    nodes: Vec<TraceNode>,
    open: Vec<TraceId>,
}

impl Default for TracedWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TracedWriter {
    pub fn new() -> Self {
        let root = TraceNode {
            source: None,
            target: TargetRegion {
                offset: 0,
                end: 0,
                range: PositionRange {
                    start: Position::default(),
                    end: Position::default(),
                },
            },
            children: Vec::new(),
        };
        Self {
            text: String::new(),
            position: Position::default(),
            nodes: vec![root],
            open: vec![TraceId(0)],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn append(&mut self, s: &str) {
        for ch in s.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.character = 0;
            } else {
                self.position.character += ch.len_utf16() as u32;
            }
        }
        self.text.push_str(s);
    }

    /// Open a node for `source`. Without a source region nothing is recorded
    /// and the text written until [`close`](Self::close) belongs to the
    /// enclosing node.
    pub fn open(&mut self, source: Option<&SourceRegion>) -> Option<TraceId> {
        let source = *source?;
        let id = TraceId(self.nodes.len());
        self.nodes.push(TraceNode {
            source: Some(source),
            target: self.here(),
            children: Vec::new(),
        });
        if let Some(parent) = self.open.last() {
            self.nodes[parent.0].children.push(id);
        }
        self.open.push(id);
        Some(id)
    }

    pub fn close(&mut self, id: Option<TraceId>) {
        let Some(id) = id else { return };
        debug_assert_eq!(self.open.last(), Some(&id), "trace scopes closed out of order");
        self.open.pop();
        let end = self.text.len();
        let position = self.position;
        let target = &mut self.nodes[id.0].target;
        target.end = end;
        target.range.end = position;
    }

    pub fn finish(mut self) -> (String, TraceTree) {
        let end = self.text.len();
        let root = &mut self.nodes[0].target;
        root.end = end;
        root.range.end = self.position;
        (self.text, TraceTree::from_nodes(self.nodes))
    }

    fn here(&self) -> TargetRegion {
        TargetRegion {
            offset: self.text.len(),
            end: self.text.len(),
            range: PositionRange {
                start: self.position,
                end: self.position,
            },
        }
    }
}

/// Composition operators over a [`TracedWriter`], available to anything
/// that owns one.
pub trait TraceBuilder: Sized {
    fn writer(&mut self) -> &mut TracedWriter;

    fn append(&mut self, s: &str) {
        self.writer().append(s);
    }

    /// Run `f` inside a node traced to `source`.
    fn traced<R>(&mut self, source: Option<&SourceRegion>, f: impl FnOnce(&mut Self) -> R) -> R {
        let id = self.writer().open(source);
        let result = f(self);
        self.writer().close(id);
        result
    }

    /// Emit `items` through `f`, writing `separator` between consecutive ones.
    fn join<T, E>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        separator: &str,
        mut f: impl FnMut(&mut Self, T) -> Result<(), E>,
    ) -> Result<(), E> {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.append(separator);
            }
            f(self, item)?;
        }
        Ok(())
    }

    fn append_if<E>(
        &mut self,
        condition: bool,
        f: impl FnOnce(&mut Self) -> Result<(), E>,
    ) -> Result<(), E> {
        if condition {
            f(self)
        } else {
            Ok(())
        }
    }
}

impl TraceBuilder for TracedWriter {
    fn writer(&mut self) -> &mut TracedWriter {
        self
    }
}
