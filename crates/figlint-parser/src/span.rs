//! Byte ranges into the parsed source.

use std::ops::Range;

/// A half-open byte range into the source text.
///
/// Spans locate diagnostics in the original markup so they can be rendered
/// with a source snippet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range. Reversed ranges are normalized.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start.min(range.end),
            end: range.start.max(range.end),
        }
    }

    /// Returns the first byte offset
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the byte offset one past the end
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns a span shifted forward by `offset` bytes
    pub fn offset(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Returns the smallest span covering both spans
    pub fn union(&self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
