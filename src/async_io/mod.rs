//! Async calculation support.
//!
//! This module computes ETags over `futures-io` sources, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes.
//!
//! - [`EtagCalculator::calculate_async`](crate::EtagCalculator::calculate_async)
//! - [`calculate_async`] - One-shot form
//!
//! This module requires the `async-io` feature to be enabled.

mod calc;

pub use calc::calculate_async;
