//! # Content Hashes — SHA-256 Values and Leaf Hashing
//!
//! Defines `ContentHash`, the 32-byte SHA-256 value used for header fields,
//! tree nodes, and commitments, together with the two hashing operations of
//! the system: leaf hashing from `CanonicalBytes` and order-sensitive
//! parent combination.
//!
//! ## Security Invariant
//!
//! `sha256_hash()` accepts only `&CanonicalBytes`, not raw `&[u8]`. This
//! compile-time constraint prevents any code path from hashing a leaf that
//! did not go through the canonicalization pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::HashParseError;

/// A 32-byte SHA-256 value.
///
/// Serializes as a lowercase 64-char hex string, which is also how hashes
/// appear in the canonical leaf encoding and in human-readable projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Byte width of a hash value.
    pub const LEN: usize = 32;

    /// Access the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-char hex string (case-insensitive, surrounding
    /// whitespace tolerated).
    pub fn from_hex(hex: &str) -> Result<Self, HashParseError> {
        let hex = hex.trim();
        if hex.len() != 64 {
            return Err(HashParseError::BadLength(hex.len()));
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| HashParseError::InvalidHex {
                index: i,
                found: String::from_utf8_lossy(chunk).into_owned(),
            })?;
            out[i] = u8::from_str_radix(pair, 16).map_err(|_| HashParseError::InvalidHex {
                index: i,
                found: pair.to_string(),
            })?;
        }
        Ok(Self(out))
    }
}

impl From<[u8; 32]> for ContentHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for ContentHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the SHA-256 leaf hash of canonical bytes.
///
/// This is the only leaf hashing path: the signature requires
/// `CanonicalBytes`, so every leaf hash in the system is provably computed
/// over a canonical encoding.
pub fn sha256_hash(data: &CanonicalBytes) -> ContentHash {
    let digest = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ContentHash(bytes)
}

/// Compute a parent hash: `SHA256(left || right)`.
///
/// Concatenation order is significant; swapping the children changes the
/// result. This non-commutativity is what binds a commitment to the leaf
/// order, not just the leaf set.
pub fn combine_hashes(left: &ContentHash, right: &ContentHash) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ContentHash(bytes)
}
