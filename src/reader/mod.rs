//! Part reading and hashing.
//!
//! [`digest_span`] seeks a source to the start of a span and feeds exactly
//! `span.len` bytes into a fresh MD5 instance. A single `read` call is never
//! assumed to fill the request:
//!
//! - short reads are continued until the span is complete
//! - [`ErrorKind::Interrupted`] is retried
//! - `Ok(0)` before the span is complete is [`EtagError::Truncated`]
//! - any other error is [`EtagError::Io`]

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::buffer::Buffer;
use crate::cancel::CancelToken;
use crate::chunk::{ChunkSpan, PartDigest};
use crate::error::EtagError;
use crate::hash::Md5Hasher;

/// Computes the digest of one span of a seekable source.
///
/// The source is left positioned at the end of the span. The cancellation
/// token, when given, is checked between reads.
///
/// # Errors
///
/// - [`EtagError::Io`] if seeking or reading fails
/// - [`EtagError::Truncated`] if the source ends inside the span
/// - [`EtagError::Cancelled`] if the token is triggered
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use s3hash::{ChunkSpan, digest_span};
///
/// let mut source = Cursor::new(b"skip-hello".to_vec());
/// let digest = digest_span(&mut source, ChunkSpan::new(0, 5, 5), 4096, None)?;
///
/// assert_eq!(digest.to_hex(), "5d41402abc4b2a76b9719d911017c592");
/// # Ok::<(), s3hash::EtagError>(())
/// ```
pub fn digest_span<R: Read + Seek + ?Sized>(
    source: &mut R,
    span: ChunkSpan,
    buffer_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<PartDigest, EtagError> {
    if buffer_size == 0 {
        return Err(EtagError::InvalidArgument {
            message: "buffer size must be non-zero",
        });
    }

    let mut buf = Buffer::take(buffer_size_for(span.len, buffer_size));
    source.seek(SeekFrom::Start(span.start))?;
    read_span(source, span, buf.as_mut_slice(), cancel)
}

/// Hashes `span.len` bytes from the current position of `source`.
pub(crate) fn read_span<R: Read + ?Sized>(
    source: &mut R,
    span: ChunkSpan,
    buf: &mut [u8],
    cancel: Option<&CancelToken>,
) -> Result<PartDigest, EtagError> {
    let mut hasher = Md5Hasher::new();
    let mut consumed = 0u64;

    while consumed < span.len {
        if let Some(token) = cancel {
            token.check()?;
        }

        let want = want_len(span.len - consumed, buf.len());
        match source.read(&mut buf[..want]) {
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

/// Caps the read buffer at the span length so small parts don't allocate a
/// full buffer.
pub(crate) fn buffer_size_for(span_len: u64, buffer_size: usize) -> usize {
    want_len(span_len, buffer_size).max(1)
}

fn want_len(remaining: u64, buf_len: usize) -> usize {
    usize::try_from(remaining).map_or(buf_len, |r| r.min(buf_len))
}
