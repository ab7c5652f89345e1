//! # hproof-core — Foundational Types for HeaderProof
//!
//! This crate is the bedrock of the HeaderProof workspace. It defines the
//! primitives the hash-tree engine is built on; `hproof-merkle` depends on
//! it, and it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL leaf encoding flows through
//!    `CanonicalBytes::new()` (RFC 8785 / JCS). No raw
//!    `serde_json::to_vec()` for anything that gets hashed. Ever.
//!
//! 2. **`sha256_hash()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every leaf hash is computed over a canonical
//!    encoding.
//!
//! 3. **Newtype for hash values.** `ContentHash` is a 32-byte value with
//!    validated hex parsing — no bare strings or `Vec<u8>` for hashes.
//!
//! 4. **Checked batch preconditions.** `BatchError` names each way a batch
//!    can be malformed; nothing silently builds a broken tree.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hproof-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod header;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{combine_hashes, sha256_hash, ContentHash};
pub use error::{BatchError, CanonicalizationError, HashParseError};
pub use header::BlockHeader;
