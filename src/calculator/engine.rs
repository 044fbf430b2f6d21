//! Sequential calculation engine.

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;
use tracing::{debug, trace};

use super::{EtagCalculator, digest_capacity};
use crate::buffer::Buffer;
use crate::chunk::{ChunkPlan, ChunkSpan, PartDigest};
use crate::error::EtagError;
use crate::etag::Etag;
use crate::hash::Md5Hasher;
use crate::progress::ProgressTracker;
use crate::reader::{buffer_size_for, read_span};

pub(super) fn calculate_reader<R: Read + Seek + ?Sized>(
    calc: &EtagCalculator,
    source: &mut R,
    data_size: u64,
) -> Result<Etag, EtagError> {
    calc.config.validate()?;
    let chunk_size = calc.config.chunk_size();
    let plan = ChunkPlan::new(data_size, chunk_size)?;
    debug!(data_size, chunk_size, parts = plan.parts(), "calculating etag");

    let tracker = ProgressTracker::new(calc.progress_fn(), chunk_size, data_size);
    let mut buf = Buffer::take(buffer_size_for(chunk_size, calc.config.buffer_size()));
    let mut digests = Vec::with_capacity(digest_capacity(plan.parts()));

    for span in plan {
        calc.check_cancelled()?;
        source.seek(SeekFrom::Start(span.start))?;
        let digest = read_span(source, span, buf.as_mut_slice(), calc.cancel.as_ref())?;
        trace!(part = span.part_number(), len = span.len, "part hashed");

        digests.push(digest);
        tracker.part_done(span.len);
    }

    let etag = Etag::from_parts(&digests);
    debug!(%etag, "etag calculated");
    Ok(etag)
}

pub(super) fn calculate_bytes(calc: &EtagCalculator, data: Bytes) -> Result<Etag, EtagError> {
    calc.config.validate()?;
    let chunk_size = calc.config.chunk_size();
    let data_size = data.len() as u64;
    let plan = ChunkPlan::new(data_size, chunk_size)?;
    debug!(data_size, chunk_size, parts = plan.parts(), "calculating etag from memory");

    let tracker = ProgressTracker::new(calc.progress_fn(), chunk_size, data_size);
    let spans: Vec<ChunkSpan> = plan.collect();
    let digests = digest_slices(calc, &data, &spans, &tracker)?;

    let etag = Etag::from_parts(&digests);
    debug!(%etag, "etag calculated");
    Ok(etag)
}

/// Hashes one in-memory part. The slice shares `data`'s allocation.
fn digest_slice(
    calc: &EtagCalculator,
    data: &Bytes,
    span: &ChunkSpan,
    tracker: &ProgressTracker<'_>,
) -> Result<PartDigest, EtagError> {
    calc.check_cancelled()?;
    let part = data.slice(span.start as usize..span.end() as usize);
    let digest = Md5Hasher::hash(&part);
    trace!(part = span.part_number(), len = span.len, "part hashed");
    tracker.part_done(span.len);
    Ok(digest)
}

#[cfg(feature = "parallel")]
fn digest_slices(
    calc: &EtagCalculator,
    data: &Bytes,
    spans: &[ChunkSpan],
    tracker: &ProgressTracker<'_>,
) -> Result<Vec<PartDigest>, EtagError> {
    use rayon::prelude::*;

    spans
        .par_iter()
        .map(|span| digest_slice(calc, data, span, tracker))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn digest_slices(
    calc: &EtagCalculator,
    data: &Bytes,
    spans: &[ChunkSpan],
    tracker: &ProgressTracker<'_>,
) -> Result<Vec<PartDigest>, EtagError> {
    spans
        .iter()
        .map(|span| digest_slice(calc, data, span, tracker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EtagConfig;
    use std::io::Cursor;

    fn calculator(chunk_size: u64) -> EtagCalculator {
        EtagCalculator::new(EtagConfig::new(chunk_size).unwrap().with_buffer_size(3))
    }

    #[test]
    fn test_bytes_matches_reader() {
        let data: Vec<u8> = (0..1000).map(|i| (i * 7 + 13) as u8).collect();
        for chunk_size in [1, 7, 100, 999, 1000, 1001] {
            let calc = calculator(chunk_size);
            let from_reader = calc
                .calculate(&mut Cursor::new(&data), data.len() as u64)
                .unwrap();
            let from_bytes = calc.calculate_bytes(data.clone()).unwrap();
            assert_eq!(from_reader, from_bytes, "chunk_size = {chunk_size}");
        }
    }

    #[test]
    fn test_reader_starts_at_zero_regardless_of_position() {
        let data = vec![9u8; 64];
        let mut cursor = Cursor::new(&data);
        cursor.set_position(40);
        let etag = calculator(16).calculate(&mut cursor, 64).unwrap();
        assert_eq!(etag, calculator(16).calculate_bytes(data.clone()).unwrap());
    }

    #[test]
    fn test_extra_trailing_bytes_ignored() {
        let data = b"0123456789".to_vec();
        let etag = calculator(4).calculate(&mut Cursor::new(&data), 8).unwrap();
        assert_eq!(etag, calculator(4).calculate_bytes(&b"01234567"[..]).unwrap());
    }

    #[test]
    fn test_empty_bytes() {
        let etag = calculator(4).calculate_bytes(Bytes::new()).unwrap();
        assert_eq!(etag.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
