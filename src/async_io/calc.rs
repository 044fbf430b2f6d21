//! Async calculation over `futures_io::AsyncRead + AsyncSeek`.
//!
//! # Example
//!
//! ```ignore
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! let file = tokio::fs::File::open("upload.bin").await?;
//! let size = file.metadata().await?.len();
//! let etag = s3hash::calculate_async(&mut file.compat(), 8 * 1024 * 1024, size).await?;
//! ```

use std::future::poll_fn;
use std::io::{self, ErrorKind, SeekFrom};
use std::pin::Pin;

use futures_io::{AsyncRead, AsyncSeek};
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::calculator::EtagCalculator;
use crate::chunk::{ChunkPlan, ChunkSpan, PartDigest};
use crate::config::EtagConfig;
use crate::error::EtagError;
use crate::etag::Etag;
use crate::hash::Md5Hasher;
use crate::progress::ProgressTracker;
use crate::reader::buffer_size_for;

impl EtagCalculator {
    /// Computes the ETag of `data_size` bytes of an async source.
    ///
    /// Same semantics as [`EtagCalculator::calculate`]: parts are hashed in
    /// order, short reads are continued, an early end of data is
    /// [`EtagError::Truncated`]. The progress callback runs inside the
    /// polling task.
    pub async fn calculate_async<R>(&self, source: &mut R, data_size: u64) -> Result<Etag, EtagError>
    where
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        self.config().validate()?;
        let chunk_size = self.config().chunk_size();
        let plan = ChunkPlan::new(data_size, chunk_size)?;
        debug!(data_size, chunk_size, parts = plan.parts(), "calculating etag (async)");

        let tracker = ProgressTracker::new(self.progress_fn(), chunk_size, data_size);
        let mut buf = Buffer::take(buffer_size_for(chunk_size, self.config().buffer_size()));
        let mut digests = Vec::new();

        for span in plan {
            self.check_cancelled()?;
            seek(source, SeekFrom::Start(span.start)).await?;
            let digest = self.read_span_async(source, span, buf.as_mut_slice()).await?;
            trace!(part = span.part_number(), len = span.len, "part hashed");

            digests.push(digest);
            tracker.part_done(span.len);
        }

        let etag = Etag::from_parts(&digests);
        debug!(%etag, "etag calculated");
        Ok(etag)
    }

    async fn read_span_async<R>(
        &self,
        source: &mut R,
        span: ChunkSpan,
        buf: &mut [u8],
    ) -> Result<PartDigest, EtagError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut hasher = Md5Hasher::new();
        let mut consumed = 0u64;

        while consumed < span.len {
            self.check_cancelled()?;

            let remaining = span.len - consumed;
            let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
            match read(source, &mut buf[..want]).await {
                Ok(0) => {
                    return Err(EtagError::Truncated {
                        part: span.index,
                        expected: span.len,
                        actual: consumed,
                    });
                }
                Ok(n) => {
                    hasher.update(&buf[..n]);
                    consumed += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(hasher.finalize())
    }
}

/// Computes the ETag of `data_size` bytes of an async source split into
/// `chunk_size` parts.
pub async fn calculate_async<R>(
    source: &mut R,
    chunk_size: u64,
    data_size: u64,
) -> Result<Etag, EtagError>
where
    R: AsyncRead + AsyncSeek + Unpin + ?Sized,
{
    EtagCalculator::new(EtagConfig::new(chunk_size)?)
        .calculate_async(source, data_size)
        .await
}

async fn seek<R: AsyncSeek + Unpin + ?Sized>(source: &mut R, pos: SeekFrom) -> io::Result<u64> {
    poll_fn(|cx| Pin::new(&mut *source).poll_seek(cx, pos)).await
}

async fn read<R: AsyncRead + Unpin + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    poll_fn(|cx| Pin::new(&mut *source).poll_read(cx, buf)).await
}
