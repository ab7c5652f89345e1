//! # Canonical Leaf Encoding — JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! bytes that become hash-tree leaves.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats and
//! then serializes with RFC 8785 (JSON Canonicalization Scheme): sorted
//! keys, compact separators, deterministic byte sequence.
//!
//! This makes the "two headers with identical content hash differently"
//! defect class structurally impossible: leaf hashing accepts only
//! `&CanonicalBytes`, and the only way to produce one is through this
//! pipeline. Two headers with identical field values always yield identical
//! leaf bytes, regardless of field declaration order or formatting.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - No float values anywhere in the encoded tree.
/// - Object keys are sorted lexicographically with compact separators
///   (RFC 8785); the output is valid UTF-8 JSON.
///
/// The inner `Vec<u8>` is private, so downstream code cannot fabricate
/// non-canonical leaf bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// All leaf encoding in the workspace must flow through this
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// a float, or `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for hashing or byte-exact comparison.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a JSON value tree and reject any float.
///
/// Floats have non-deterministic canonical-number edge cases across
/// serializers, so the encoding forbids them outright. Integers, strings,
/// booleans and null pass through; objects and arrays are recursed.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}
