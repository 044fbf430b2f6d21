//! The ChunkSpan type - one fixed-size part of the source.

use std::fmt;

/// A contiguous byte range of the source that is hashed as one part.
///
/// Spans are produced by [`ChunkPlan`](crate::ChunkPlan) and are only
/// meaningful relative to the plan that produced them.
///
/// # Example
///
/// ```
/// use s3hash::ChunkSpan;
///
/// let span = ChunkSpan::new(2, 200, 100);
/// assert_eq!(span.range(), 200..300);
/// assert_eq!(span.part_number(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSpan {
    /// Zero-based part index.
    pub index: u64,

    /// Offset of the first byte in the source.
    pub start: u64,

    /// Number of bytes in the part.
    pub len: u64,
}

impl ChunkSpan {
    /// Creates a new span.
    pub const fn new(index: u64, start: u64, len: u64) -> Self {
        Self { index, start, len }
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.start + self.len
    }

    /// Returns the span as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start..self.end()
    }

    /// Returns the one-based part number, as used by multipart upload APIs.
    pub fn part_number(&self) -> u64 {
        self.index + 1
    }

    /// Returns true if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for ChunkSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Part({} @ {}..{}, {} bytes)",
            self.part_number(),
            self.start,
            self.end(),
            self.len
        )
    }
}
