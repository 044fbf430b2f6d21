//! Fixed-size part planning.
//!
//! A [`ChunkPlan`] splits `[0, data_size)` into `ceil(data_size / chunk_size)`
//! contiguous spans. Every span except the last is exactly `chunk_size`
//! bytes; the last one holds the remainder. Empty input yields no spans.

use std::iter::FusedIterator;

use crate::chunk::ChunkSpan;
use crate::error::EtagError;

/// Creates the part plan for `data_size` bytes split into `chunk_size` parts.
///
/// # Errors
///
/// Returns [`EtagError::InvalidArgument`] if `chunk_size` is zero.
///
/// # Example
///
/// ```
/// let spans: Vec<_> = s3hash::plan(25, 10)?.collect();
///
/// assert_eq!(spans.len(), 3);
/// assert_eq!(spans[2].range(), 20..25);
/// # Ok::<(), s3hash::EtagError>(())
/// ```
pub fn plan(data_size: u64, chunk_size: u64) -> Result<ChunkPlan, EtagError> {
    ChunkPlan::new(data_size, chunk_size)
}

/// An iterator over the spans of a fixed-size part layout.
///
/// The plan is cheap to copy and supports random access through
/// [`ChunkPlan::get`], which the parallel calculator uses to hand spans to
/// workers out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    data_size: u64,
    chunk_size: u64,
    parts: u64,
    next: u64,
}

impl ChunkPlan {
    /// Creates a new plan.
    ///
    /// Returns error if `chunk_size` is zero.
    pub fn new(data_size: u64, chunk_size: u64) -> Result<Self, EtagError> {
        if chunk_size == 0 {
            return Err(EtagError::InvalidArgument {
                message: "chunk size must be non-zero",
            });
        }

        Ok(Self {
            data_size,
            chunk_size,
            parts: data_size.div_ceil(chunk_size),
            next: 0,
        })
    }

    /// Returns the total number of parts in the plan.
    pub fn parts(&self) -> u64 {
        self.parts
    }

    /// Returns the total data size the plan covers.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Returns the part size.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Returns the span with the given index, or `None` if out of range.
    pub fn get(&self, index: u64) -> Option<ChunkSpan> {
        if index >= self.parts {
            return None;
        }
        let start = index * self.chunk_size;
        let len = self.chunk_size.min(self.data_size - start);
        Some(ChunkSpan::new(index, start, len))
    }

    fn remaining(&self) -> u64 {
        self.parts - self.next
    }
}

impl Iterator for ChunkPlan {
    type Item = ChunkSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.get(self.next)?;
        self.next += 1;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for ChunkPlan {}

impl FusedIterator for ChunkPlan {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            plan(100, 0),
            Err(EtagError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_input_has_no_spans() {
        let p = plan(0, 10).unwrap();
        assert_eq!(p.parts(), 0);
        assert_eq!(p.count(), 0);
    }

    #[test]
    fn test_exact_multiple() {
        let spans: Vec<_> = plan(30, 10).unwrap().collect();
        assert_eq!(spans.len(), 3);
        assert!(spans.iter().all(|s| s.len == 10));
        assert_eq!(spans[2].end(), 30);
    }

    #[test]
    fn test_remainder_in_last_span() {
        let spans: Vec<_> = plan(31, 10).unwrap().collect();
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[3], ChunkSpan::new(3, 30, 1));
    }

    #[test]
    fn test_smaller_than_chunk() {
        let spans: Vec<_> = plan(51, 1024 * 1024).unwrap().collect();
        assert_eq!(spans, vec![ChunkSpan::new(0, 0, 51)]);
    }

    #[test]
    fn test_partition_properties() {
        for data_size in [0u64, 1, 2, 9, 10, 11, 99, 100, 101, 1000, 4097] {
            for chunk_size in [1u64, 2, 3, 7, 10, 64, 100, 4096, 10_000] {
                let p = plan(data_size, chunk_size).unwrap();
                assert_eq!(p.len() as u64, data_size.div_ceil(chunk_size));

                let mut expected_start = 0u64;
                let spans: Vec<_> = p.collect();
                for (i, span) in spans.iter().enumerate() {
                    assert_eq!(span.index, i as u64);
                    assert_eq!(span.start, expected_start);
                    assert!(span.len > 0 && span.len <= chunk_size);
                    if i + 1 < spans.len() {
                        assert_eq!(span.len, chunk_size);
                    }
                    expected_start = span.end();
                }
                assert_eq!(expected_start, data_size);
            }
        }
    }

    #[test]
    fn test_get_matches_iteration() {
        let p = plan(1000, 64).unwrap();
        for span in p {
            assert_eq!(p.get(span.index), Some(span));
        }
        assert_eq!(p.get(p.parts()), None);
    }

    #[test]
    fn test_size_hint_shrinks() {
        let mut p = plan(25, 10).unwrap();
        assert_eq!(p.len(), 3);
        p.next();
        assert_eq!(p.len(), 2);
        p.next();
        p.next();
        assert_eq!(p.len(), 0);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn test_huge_sizes_do_not_overflow() {
        let p = plan(u64::MAX, u64::MAX / 2).unwrap();
        assert_eq!(p.parts(), 3);
        let last = p.get(2).unwrap();
        assert_eq!(last.end(), u64::MAX);
        assert_eq!(last.len, 1);
    }
}
