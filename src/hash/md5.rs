//! MD5-based part hashing implementation.

use md5::{Digest, Md5};

use crate::chunk::PartDigest;

/// A hasher that computes MD5 part digests.
#[derive(Debug, Clone, Default)]
pub struct Md5Hasher {
    state: Md5,
}

impl Md5Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self { state: Md5::new() }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the digest.
    pub fn finalize(self) -> PartDigest {
        PartDigest::new(self.state.finalize().into())
    }

    /// Convenience method to hash data in one shot.
    pub fn hash(data: &[u8]) -> PartDigest {
        PartDigest::new(Md5::digest(data).into())
    }
}
