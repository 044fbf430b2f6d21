//! Internal read buffer management.
//!
//! This module provides a thread-local buffer pool so that repeated part
//! reads, including those on rayon workers, reuse their allocations. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
