//! # Block Header Record
//!
//! `BlockHeader` is the record committed into hash trees: an
//! already-deserialized header from the upstream feed, carrying its unique
//! block number and its unique content hash (both computed upstream), plus
//! the chain roots and opaque digest logs.
//!
//! Headers are immutable once handed to a tree. The canonical leaf encoding
//! of a header is `CanonicalBytes::new(&header)`: JCS JSON with
//! lexicographically sorted keys and all hashes as lowercase hex, so two
//! headers with identical semantic content always encode — and therefore
//! hash — identically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::CanonicalBytes;
use crate::digest::ContentHash;
use crate::error::CanonicalizationError;

/// A block header as delivered by the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block number; unique within and across batches by upstream contract.
    pub number: u64,
    /// Content hash of the header, computed upstream; unique by contract.
    pub hash: ContentHash,
    /// Hash of the parent block's header.
    pub parent_hash: ContentHash,
    /// State trie root.
    pub state_root: ContentHash,
    /// Extrinsics trie root.
    pub extrinsics_root: ContentHash,
    /// Opaque digest log entries; carried through the leaf encoding
    /// unchanged. Must not contain floats.
    pub digest: Value,
}

impl BlockHeader {
    /// Construct a header with an empty digest log.
    pub fn new(
        number: u64,
        hash: ContentHash,
        parent_hash: ContentHash,
        state_root: ContentHash,
        extrinsics_root: ContentHash,
    ) -> Self {
        Self {
            number,
            hash,
            parent_hash,
            state_root,
            extrinsics_root,
            digest: Value::Object(serde_json::Map::new()),
        }
    }

    /// The canonical leaf encoding of this header.
    ///
    /// This is the exact byte string that gets hashed into a tree's leaf
    /// layer, and the byte string `prove` matches against.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }

    /// Human-readable JSON projection of the header (hashes as hex strings).
    pub fn human(&self) -> Result<Value, CanonicalizationError> {
        Ok(serde_json::to_value(self)?)
    }
}
