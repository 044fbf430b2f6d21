//! Digest implementation for part identity.
//!
//! Multipart ETags are defined over MD5, so this is the only digest offered.
//!
//! - [`Md5Hasher`] - Incremental MD5 producing [`PartDigest`](crate::PartDigest)

mod md5;

pub use self::md5::Md5Hasher;
