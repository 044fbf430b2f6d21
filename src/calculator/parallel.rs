//! Parallel calculation on the rayon pool.
//!
//! Parts are independent, so each one is hashed by whichever worker picks it
//! up, through its own cursor. Results are collected in part-index order, which
//! keeps the aggregate in part order no matter which part finishes first.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, trace};

use super::EtagCalculator;
use crate::buffer::Buffer;
use crate::chunk::{ChunkPlan, ChunkSpan, PartDigest};
use crate::error::EtagError;
use crate::etag::Etag;
use crate::progress::ProgressTracker;
use crate::reader::{buffer_size_for, read_span};

impl EtagCalculator {
    /// Computes the ETag with parts hashed concurrently.
    ///
    /// `open` is called once per part and must return an independent cursor
    /// over the same data, e.g. a fresh [`File`] handle or a
    /// [`Cursor`](std::io::Cursor) over shared bytes. The result is
    /// identical to [`EtagCalculator::calculate`].
    ///
    /// Progress callbacks are serialized and carry cumulative counts, but may
    /// arrive in any part order. The first failing part aborts the rest; which
    /// error is reported when several parts fail at once is unspecified.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Cursor;
    /// use s3hash::{EtagCalculator, EtagConfig};
    ///
    /// let data = vec![42u8; 1000];
    /// let calculator = EtagCalculator::new(EtagConfig::new(100)?);
    ///
    /// let parallel = calculator.calculate_parallel(|| Ok(Cursor::new(&data)), 1000)?;
    /// let sequential = calculator.calculate(&mut Cursor::new(&data), 1000)?;
    /// assert_eq!(parallel, sequential);
    /// # Ok::<(), s3hash::EtagError>(())
    /// ```
    pub fn calculate_parallel<R, F>(&self, open: F, data_size: u64) -> Result<Etag, EtagError>
    where
        R: Read + Seek,
        F: Fn() -> io::Result<R> + Sync,
    {
        self.config.validate()?;
        let chunk_size = self.config.chunk_size();
        let plan = ChunkPlan::new(data_size, chunk_size)?;
        debug!(
            data_size,
            chunk_size,
            parts = plan.parts(),
            threads = rayon::current_num_threads(),
            "calculating etag in parallel"
        );

        // Nothing is preallocated from `data_size`; the source may be shorter.
        let tracker = ProgressTracker::new(self.progress_fn(), chunk_size, data_size);
        let digests = (0..plan.parts())
            .into_par_iter()
            .filter_map(|index| plan.get(index))
            .map(|span| {
                let digest = self.digest_part(&open, span)?;
                tracker.part_done(span.len);
                Ok(digest)
            })
            .collect::<Result<Vec<PartDigest>, EtagError>>()?;

        let etag = Etag::from_parts(&digests);
        debug!(%etag, "etag calculated");
        Ok(etag)
    }

    /// Computes the ETag of a file, reopening it for every part so that parts
    /// are read concurrently.
    pub fn calculate_file_parallel(&self, path: impl AsRef<Path>) -> Result<Etag, EtagError> {
        self.config.validate()?;
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        self.calculate_parallel(|| File::open(path), size)
    }

    fn digest_part<R, F>(&self, open: &F, span: ChunkSpan) -> Result<PartDigest, EtagError>
    where
        R: Read + Seek,
        F: Fn() -> io::Result<R>,
    {
        self.check_cancelled()?;
        let mut source = open()?;
        source.seek(SeekFrom::Start(span.start))?;

        let mut buf = Buffer::take(buffer_size_for(span.len, self.config.buffer_size()));
        let digest = read_span(&mut source, span, buf.as_mut_slice(), self.cancel.as_ref())?;
        trace!(part = span.part_number(), len = span.len, "part hashed");
        Ok(digest)
    }
}
