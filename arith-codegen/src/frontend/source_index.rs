use crate::ast::{Position, PositionRange, SourceRegion};

/// Line-start index of a source text, for byte offset to line/character
/// conversion.
#[derive(Debug, Clone)]
pub struct SourceIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> SourceIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        Self {
            source,
            line_starts: starts,
        }
    }

    /// Convert a byte offset to a 0-based position, counting characters in
    /// UTF-16 code units. `None` past the end or inside a multi-byte char.
    pub fn position(&self, byte: usize) -> Option<Position> {
        if !self.source.is_char_boundary(byte) {
            return None;
        }
        let line = self.line_starts.partition_point(|start| *start <= byte) - 1;
        let start = self.line_starts[line];
        let character = self.source[start..byte].encode_utf16().count();
        Some(Position::new(line as u32, character as u32))
    }

    /// Convert a 0-based position back to a byte offset.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let start = *self.line_starts.get(position.line as usize)?;
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .copied()
            .unwrap_or(self.source.len());
        let mut units = 0u32;
        for (i, ch) in self.source[start..line_end].char_indices() {
            if units == position.character {
                return Some(start + i);
            }
            units += ch.len_utf16() as u32;
        }
        (units == position.character).then_some(line_end)
    }

    pub fn range(&self, offset: usize, end: usize) -> Option<PositionRange> {
        if offset > end {
            return None;
        }
        Some(PositionRange {
            start: self.position(offset)?,
            end: self.position(end)?,
        })
    }

    /// A region for `[offset, end)` with its positions filled in.
    pub fn region(&self, offset: usize, end: usize) -> SourceRegion {
        SourceRegion {
            offset,
            end,
            range: self.range(offset, end),
        }
    }
}
