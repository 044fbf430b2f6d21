//! Configuration for ETag calculation.
//!
//! - [`EtagConfig`] - Part size and read buffer size
//!
//! # Example
//!
//! ```
//! use s3hash::EtagConfig;
//!
//! // 5 MiB parts, the smallest part size most object stores accept
//! let config = EtagConfig::new(5 * 1024 * 1024)?;
//!
//! // Larger read buffer for fast disks
//! let config = config.with_buffer_size(1024 * 1024);
//! config.validate()?;
//!
//! # Ok::<(), s3hash::EtagError>(())
//! ```

use crate::error::EtagError;

/// Default part size (8 MiB), the multipart threshold and part size used by
/// the common S3 command line tools.
pub const DEFAULT_CHUNK_SIZE: u64 = 8 * 1024 * 1024;

/// Default read buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for ETag calculation.
///
/// `chunk_size` must match the part size of the upload being verified; the
/// resulting fingerprint is only comparable for the same part size.
/// `buffer_size` only affects how many bytes are requested per `read` call
/// and never changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EtagConfig {
    chunk_size: u64,
    buffer_size: usize,
}

impl EtagConfig {
    /// Creates a new configuration with the given part size.
    ///
    /// # Errors
    ///
    /// Returns [`EtagError::InvalidArgument`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use s3hash::EtagConfig;
    ///
    /// let config = EtagConfig::new(16 * 1024 * 1024)?;
    /// assert_eq!(config.chunk_size(), 16 * 1024 * 1024);
    ///
    /// assert!(EtagConfig::new(0).is_err());
    /// # Ok::<(), s3hash::EtagError>(())
    /// ```
    pub fn new(chunk_size: u64) -> Result<Self, EtagError> {
        let config = Self {
            chunk_size,
            buffer_size: DEFAULT_BUFFER_SIZE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the part size.
    ///
    /// Note: This does not validate the configuration. Use [`EtagConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the read buffer size.
    ///
    /// Note: This does not validate the configuration. Use [`EtagConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns the part size.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Returns the read buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use s3hash::EtagConfig;
    ///
    /// let config = EtagConfig::default().with_buffer_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), EtagError> {
        if self.chunk_size == 0 {
            return Err(EtagError::InvalidArgument {
                message: "chunk size must be non-zero",
            });
        }

        if self.buffer_size == 0 {
            return Err(EtagError::InvalidArgument {
                message: "buffer size must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for EtagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
