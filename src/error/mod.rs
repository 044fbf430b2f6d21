//! Error types for s3hash.

use std::fmt;

/// Errors that can occur while computing an ETag.
#[derive(Debug)]
pub enum EtagError {
    /// An I/O error occurred while seeking or reading the source.
    Io(std::io::Error),

    /// The source ended before the declared data size was read.
    Truncated {
        /// Index of the part being read when the source ran dry.
        part: u64,
        /// Bytes the part should have contained.
        expected: u64,
        /// Bytes actually read for the part.
        actual: u64,
    },

    /// Invalid argument or configuration parameter.
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The computation was aborted through a [`CancelToken`](crate::CancelToken).
    Cancelled,

    /// A string could not be parsed as an ETag.
    InvalidEtag {
        /// Description of what was malformed.
        message: &'static str,
    },
}

impl EtagError {
    /// Returns true if this error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EtagError::Cancelled)
    }
}

impl fmt::Display for EtagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtagError::Io(e) => write!(f, "io error: {}", e),
            EtagError::Truncated {
                part,
                expected,
                actual,
            } => write!(
                f,
                "truncated input: part {} ended after {} of {} bytes",
                part, actual, expected
            ),
            EtagError::InvalidArgument { message } => {
                write!(f, "invalid argument: {}", message)
            }
            EtagError::Cancelled => write!(f, "calculation cancelled"),
            EtagError::InvalidEtag { message } => write!(f, "invalid etag: {}", message),
        }
    }
}

impl std::error::Error for EtagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EtagError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EtagError {
    fn from(e: std::io::Error) -> Self {
        EtagError::Io(e)
    }
}
