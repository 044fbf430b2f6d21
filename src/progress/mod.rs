//! Progress reporting.
//!
//! A calculation reports a [`Progress`] snapshot after every completed part.
//! Rendering it is up to the caller.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Snapshot of a running calculation, taken after a part completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes hashed so far, across all completed parts.
    pub bytes_processed: u64,
    /// Configured part size.
    pub chunk_size: u64,
    /// Total bytes to hash.
    pub data_size: u64,
    /// Number of parts completed so far.
    pub parts_completed: u64,
}

impl Progress {
    /// Returns the total number of parts of the calculation.
    pub fn total_parts(&self) -> u64 {
        self.data_size.div_ceil(self.chunk_size.max(1))
    }

    /// Returns completion as a percentage in `0.0..=100.0`.
    ///
    /// Empty input counts as complete.
    pub fn percent(&self) -> f64 {
        if self.data_size == 0 {
            return 100.0;
        }
        self.bytes_processed as f64 / self.data_size as f64 * 100.0
    }

    /// Returns true once every byte has been hashed.
    pub fn is_complete(&self) -> bool {
        self.bytes_processed == self.data_size
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} parts, {:.2} %",
            self.parts_completed,
            self.total_parts(),
            self.percent()
        )
    }
}

/// Progress callback shared between the calculator and its workers.
pub(crate) type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// Accumulates completed parts and forwards snapshots to the callback.
///
/// Updates and callback invocations happen under one lock, so every call
/// observes a strictly larger cumulative count than the previous one even
/// when parts complete on several threads.
pub(crate) struct ProgressTracker<'a> {
    callback: Option<&'a ProgressFn>,
    state: Mutex<Progress>,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(callback: Option<&'a ProgressFn>, chunk_size: u64, data_size: u64) -> Self {
        Self {
            callback,
            state: Mutex::new(Progress {
                bytes_processed: 0,
                chunk_size,
                data_size,
                parts_completed: 0,
            }),
        }
    }

    /// Records a completed part of `len` bytes.
    pub(crate) fn part_done(&self, len: u64) {
        let Some(callback) = self.callback else {
            return;
        };
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.bytes_processed += len;
        state.parts_completed += 1;
        callback(*state);
    }
}
