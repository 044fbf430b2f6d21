//! The ETag result type.
//!
//! An [`Etag`] is built from the ordered part digests of a calculation:
//!
//! - one part: the fingerprint is that part's digest, unchanged
//! - several parts: the fingerprint is the MD5 of all part digests
//!   concatenated in part order, followed by `-<parts>`
//!
//! # Example
//!
//! ```
//! use s3hash::Etag;
//!
//! let etag: Etag = "38a7e5991be21b577978abb001323b0a-20".parse()?;
//! assert_eq!(etag.parts(), 20);
//! assert_eq!(etag.to_string(), "38a7e5991be21b577978abb001323b0a-20");
//! # Ok::<(), s3hash::EtagError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::chunk::PartDigest;
use crate::error::EtagError;
use crate::hash::Md5Hasher;

/// A multipart-upload-compatible content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Etag {
    digest: PartDigest,
    parts: u64,
}

impl Etag {
    /// Combines ordered part digests into the final fingerprint.
    ///
    /// No part digests (empty input) yields the digest of the empty byte
    /// sequence as a single part, which is what an object store reports for
    /// an empty object.
    ///
    /// # Example
    ///
    /// ```
    /// use s3hash::{Etag, PartDigest};
    ///
    /// let single = PartDigest::new([0x11; 16]);
    /// let etag = Etag::from_parts(&[single]);
    ///
    /// // A single part is not hashed again
    /// assert_eq!(etag.digest(), single);
    /// assert_eq!(etag.parts(), 1);
    /// ```
    pub fn from_parts(digests: &[PartDigest]) -> Self {
        match digests {
            [] => Self {
                digest: Md5Hasher::hash(&[]),
                parts: 1,
            },
            [single] => Self {
                digest: *single,
                parts: 1,
            },
            many => {
                let mut hasher = Md5Hasher::new();
                for digest in many {
                    hasher.update(digest.as_bytes());
                }
                Self {
                    digest: hasher.finalize(),
                    parts: many.len() as u64,
                }
            }
        }
    }

    /// Creates an ETag from an already-combined digest and part count.
    ///
    /// Returns `None` if `parts` is zero.
    pub fn new(digest: PartDigest, parts: u64) -> Option<Self> {
        (parts > 0).then_some(Self { digest, parts })
    }

    /// Returns the final digest.
    pub fn digest(&self) -> PartDigest {
        self.digest
    }

    /// Returns the number of parts the fingerprint was computed over.
    pub fn parts(&self) -> u64 {
        self.parts
    }

    /// Returns true if the fingerprint carries a part-count suffix.
    pub fn is_multipart(&self) -> bool {
        self.parts > 1
    }

    /// Returns the digest as lowercase hex, without the part suffix.
    pub fn to_hex(&self) -> String {
        self.digest.to_hex()
    }
}

impl fmt::Display for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.digest, f)?;
        if self.is_multipart() {
            write!(f, "-{}", self.parts)?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.digest, f)?;
        if self.is_multipart() {
            write!(f, "-{}", self.parts)?;
        }
        Ok(())
    }
}

/// Parses `<hex>` or `<hex>-<parts>`.
///
/// Surrounding double quotes, as found in HTTP `ETag` headers, are stripped.
/// A `-1` suffix is rejected: a one-part multipart upload is fingerprinted
/// as the MD5 of its digest, which this crate never produces.
impl FromStr for Etag {
    type Err = EtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(s);

        let (hex_part, parts) = match s.split_once('-') {
            None => (s, 1),
            Some((hex_part, suffix)) => {
                let canonical = suffix.bytes().all(|b| b.is_ascii_digit())
                    && !suffix.starts_with('0');
                let parts: u64 = suffix
                    .parse()
                    .ok()
                    .filter(|_| canonical)
                    .ok_or(EtagError::InvalidEtag {
                        message: "part count is not a canonical decimal number",
                    })?;
                if parts < 2 {
                    return Err(EtagError::InvalidEtag {
                        message: "part count suffix must be at least 2",
                    });
                }
                (hex_part, parts)
            }
        };

        let digest = PartDigest::from_hex(hex_part).ok_or(EtagError::InvalidEtag {
            message: "digest must be 32 hex characters",
        })?;

        Ok(Self { digest, parts })
    }
}
