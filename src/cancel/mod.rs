//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::EtagError;

/// A cloneable flag that aborts a running calculation.
///
/// Calculations check the token before each part and between read buffer
/// fills, then return [`EtagError::Cancelled`]. All clones share one flag.
///
/// # Example
///
/// ```
/// use s3hash::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(EtagError::Cancelled)` if cancellation was requested.
    pub(crate) fn check(&self) -> Result<(), EtagError> {
        if self.is_cancelled() {
            return Err(EtagError::Cancelled);
        }
        Ok(())
    }
}
