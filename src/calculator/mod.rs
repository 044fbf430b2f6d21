//! ETag calculation.
//!
//! - [`EtagCalculator`] - Configured calculator with progress and cancellation
//! - [`calculate`] - One-shot calculation over a seekable source
//! - [`calculate_file`] - One-shot calculation over a file on disk
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use s3hash::{EtagCalculator, EtagConfig};
//!
//! let data = vec![7u8; 300];
//! let calculator = EtagCalculator::new(EtagConfig::new(128)?)
//!     .with_progress(|p| println!("{p}"));
//!
//! let etag = calculator.calculate(&mut Cursor::new(&data), data.len() as u64)?;
//! assert_eq!(etag.parts(), 3);
//! # Ok::<(), s3hash::EtagError>(())
//! ```

mod engine;
#[cfg(feature = "parallel")]
mod parallel;

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::config::EtagConfig;
use crate::error::EtagError;
use crate::etag::Etag;
use crate::progress::{Progress, ProgressFn};

/// Upper bound on digests reserved up front; declared sizes are not trusted
/// for allocation.
const MAX_PREALLOCATED_PARTS: u64 = 10_000;

/// Computes multipart ETags with a fixed configuration.
///
/// The calculator is cheap to clone; clones share the progress callback and
/// cancellation token.
#[derive(Clone, Default)]
pub struct EtagCalculator {
    config: EtagConfig,
    progress: Option<Arc<ProgressFn>>,
    cancel: Option<CancelToken>,
}

impl EtagCalculator {
    /// Creates a new calculator with the given configuration.
    pub fn new(config: EtagConfig) -> Self {
        Self {
            config,
            progress: None,
            cancel: None,
        }
    }

    /// Registers a callback invoked after every completed part.
    ///
    /// The callback runs on the hashing thread and blocks it until it
    /// returns. It cannot influence the result.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the configuration used by this calculator.
    pub fn config(&self) -> &EtagConfig {
        &self.config
    }

    /// Computes the ETag of `data_size` bytes of `source`, starting at
    /// offset 0.
    ///
    /// Parts are hashed one after another on the calling thread. The source
    /// is not closed; its final position is unspecified.
    ///
    /// # Errors
    ///
    /// - [`EtagError::InvalidArgument`] for an invalid configuration, before
    ///   any I/O
    /// - [`EtagError::Io`] if seeking or reading fails
    /// - [`EtagError::Truncated`] if `source` holds fewer than `data_size` bytes
    /// - [`EtagError::Cancelled`] if the token is triggered
    pub fn calculate<R: Read + Seek + ?Sized>(
        &self,
        source: &mut R,
        data_size: u64,
    ) -> Result<Etag, EtagError> {
        engine::calculate_reader(self, source, data_size)
    }

    /// Computes the ETag of an in-memory buffer.
    ///
    /// Parts are hashed in parallel when the `parallel` feature is enabled.
    ///
    /// # Example
    ///
    /// ```
    /// use s3hash::EtagCalculator;
    ///
    /// let etag = EtagCalculator::default().calculate_bytes(&b"hello"[..])?;
    /// assert_eq!(etag.to_string(), "5d41402abc4b2a76b9719d911017c592");
    /// # Ok::<(), s3hash::EtagError>(())
    /// ```
    pub fn calculate_bytes(&self, data: impl Into<bytes::Bytes>) -> Result<Etag, EtagError> {
        engine::calculate_bytes(self, data.into())
    }

    /// Computes the ETag of a file, taking its size from the file metadata.
    pub fn calculate_file(&self, path: impl AsRef<Path>) -> Result<Etag, EtagError> {
        self.config.validate()?;
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();
        self.calculate(&mut file, size)
    }

    /// Computes the ETag and compares it against `expected`.
    ///
    /// Returns `Ok(false)` without reading if the part count implied by the
    /// configured part size differs from the one in `expected`.
    pub fn verify<R: Read + Seek + ?Sized>(
        &self,
        source: &mut R,
        data_size: u64,
        expected: &Etag,
    ) -> Result<bool, EtagError> {
        let plan = crate::chunk::plan(data_size, self.config.chunk_size())?;
        if plan.parts().max(1) != expected.parts() {
            return Ok(false);
        }
        Ok(self.calculate(source, data_size)? == *expected)
    }

    pub(crate) fn progress_fn(&self) -> Option<&ProgressFn> {
        self.progress.as_deref()
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), EtagError> {
        match &self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for EtagCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtagCalculator")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

/// Computes the ETag of `data_size` bytes of `source` split into
/// `chunk_size` parts.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
///
/// let data = b"Time flies like an arrow; fruit flies like a banana";
/// let etag = s3hash::calculate(&mut Cursor::new(data), 1024 * 1024, data.len() as u64)?;
///
/// assert_eq!(etag.to_string(), "bf8043c1e6890929374ea8f19828acbb");
/// # Ok::<(), s3hash::EtagError>(())
/// ```
pub fn calculate<R: Read + Seek + ?Sized>(
    source: &mut R,
    chunk_size: u64,
    data_size: u64,
) -> Result<Etag, EtagError> {
    EtagCalculator::new(EtagConfig::new(chunk_size)?).calculate(source, data_size)
}

/// Computes the ETag of the file at `path` split into `chunk_size` parts.
pub fn calculate_file(path: impl AsRef<Path>, chunk_size: u64) -> Result<Etag, EtagError> {
    EtagCalculator::new(EtagConfig::new(chunk_size)?).calculate_file(path)
}

fn digest_capacity(parts: u64) -> usize {
    usize::try_from(parts.min(MAX_PREALLOCATED_PARTS)).unwrap_or(0)
}
