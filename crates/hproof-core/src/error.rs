//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout HeaderProof. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Batch preconditions fail loudly at construction with the offending
//!   length in the message.
//! - Once a tree is built, the only caller-visible runtime "failure" is
//!   structural absence (`None`, empty proof) — absence is not an error.

use thiserror::Error;

/// Error during canonical leaf serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical leaf encodings. Any
    /// numeric field must be an integer or a string.
    #[error("float values are not permitted in canonical leaf encodings: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing a content hash from its textual form.
#[derive(Error, Debug)]
pub enum HashParseError {
    /// The input was not 64 hex characters.
    #[error("expected 64 hex chars, got {0}")]
    BadLength(usize),

    /// A character pair could not be decoded as a hex byte.
    #[error("invalid hex at byte {index}: {found:?}")]
    InvalidHex {
        /// Offset of the offending byte pair.
        index: usize,
        /// The characters that failed to decode.
        found: String,
    },
}

/// Error constructing a hash tree from a header batch.
///
/// These are checked preconditions: the upstream batcher guarantees a
/// power-of-two batch of at least two headers, and violations are rejected
/// here with a named variant instead of silently building a malformed tree.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The batch contained no headers.
    #[error("header batch is empty")]
    Empty,

    /// The batch contained a single header. Single-leaf trees have no
    /// defined commitment in this system and are rejected.
    #[error("header batch needs at least two headers, got {0}")]
    TooSmall(usize),

    /// The batch length was not a power of two. Construction does not pad.
    #[error("header batch length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// A header in the batch could not be canonically encoded.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
