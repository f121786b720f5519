//! Byte spans into a parsed document

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into a document's source buffer
///
/// Every syntax node reports its position as a `SourceSpan`; the extractor
/// never looks at anything else when slicing text out of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the start of the span (inclusive)
    pub start: usize,
    /// Byte offset of the end of the span (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        SourceSpan { start, end }
    }

    /// Get the length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains another span
    pub fn contains(&self, other: &SourceSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice the span out of `source`
    ///
    /// Returns `None` when the span runs past the buffer or does not fall on
    /// UTF-8 character boundaries. Backwards spans slice to `None` as well.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for SourceSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        SourceSpan::new(range.start, range.end)
    }
}
