//! s3hash
//!
//! Local computation of S3 multipart ETags.
//!
//! An object uploaded in fixed-size parts is fingerprinted by the object
//! store as the MD5 of the concatenated per-part MD5 digests, followed by
//! `-<parts>`. `s3hash` reproduces that fingerprint from local data so an
//! upload can be verified without downloading it again:
//!
//! - split `[0, data_size)` into `chunk_size` parts
//! - MD5 each part
//! - one part: the ETag is that digest
//! - several parts: the ETag is MD5 over all part digests, in order, plus `-N`
//!
//! The crate intentionally:
//! - does NOT talk to any object store
//! - does NOT support digests other than MD5
//! - does NOT own or close the sources it reads
//!
//! # Sync
//!
//! ```no_run
//! use s3hash::EtagError;
//!
//! fn main() -> Result<(), EtagError> {
//!     let etag = s3hash::calculate_file("upload.bin", 8 * 1024 * 1024)?;
//!     println!("{etag}");
//!     Ok(())
//! }
//! ```
//!
//! # Parallel (feature = "parallel", default)
//!
//! ```no_run
//! use std::fs::File;
//! use s3hash::{EtagCalculator, EtagConfig};
//!
//! # fn main() -> Result<(), s3hash::EtagError> {
//! let calculator = EtagCalculator::new(EtagConfig::new(16 * 1024 * 1024)?);
//! let size = std::fs::metadata("upload.bin")?.len();
//! let etag = calculator.calculate_parallel(|| File::open("upload.bin"), size)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_io::{AsyncRead, AsyncSeek};
//!
//! async fn demo<R: AsyncRead + AsyncSeek + Unpin>(mut reader: R, size: u64) -> Result<(), s3hash::EtagError> {
//!     let etag = s3hash::calculate_async(&mut reader, 8 * 1024 * 1024, size).await?;
//!     println!("{etag}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod calculator;
mod cancel;
mod chunk;
mod config;
mod error;
mod etag;
mod progress;
mod reader;

mod buffer; // internal (thread-local reuse)
mod hash; // internal md5 impl

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface
//

pub use calculator::{EtagCalculator, calculate, calculate_file};
pub use cancel::CancelToken;
pub use chunk::{ChunkPlan, ChunkSpan, PartDigest, plan};
pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE, EtagConfig};
pub use error::EtagError;
pub use etag::Etag;
pub use progress::Progress;
pub use reader::digest_span;

#[cfg(feature = "async-io")]
pub use async_io::calculate_async;
