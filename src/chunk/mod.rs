//! Part types.
//!
//! - [`ChunkSpan`] - One fixed-size byte range of the source
//! - [`ChunkPlan`] - Ordered spans partitioning the source
//! - [`PartDigest`] - 16-byte MD5 digest of a part

mod digest;
mod plan;
mod span;

pub use digest::PartDigest;
pub use plan::{ChunkPlan, plan};
pub use span::ChunkSpan;
