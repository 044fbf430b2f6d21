//! Part digest types.

use std::fmt;

/// The MD5 digest of one part.
///
/// This is a thin wrapper around a 16-byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartDigest([u8; 16]);

impl PartDigest {
    /// The size of the digest in bytes.
    pub const SIZE: usize = 16;

    /// Creates a new digest from a byte array.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a new digest from a slice.
    ///
    /// Returns `None` if the slice is not exactly 16 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 16] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the digest as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creates a digest from a hex string.
    ///
    /// Accepts either case. Returns `None` if the string is not valid hex
    /// or not exactly 32 characters.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(hex_str, &mut bytes).ok()?;
        Some(Self(bytes))
    }
}

impl AsRef<[u8]> for PartDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for PartDigest {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PartDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for PartDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::UpperHex for PartDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}
