//! # hproof-merkle — Hash-Tree Engine
//!
//! The core of HeaderProof:
//!
//! - **`MerkleTree`** — an immutable binary SHA-256 commitment tree over
//!   one power-of-two batch of block headers, stored as a flat node array;
//!   generates and verifies compact inclusion proofs.
//! - **`Proof`** — serializable leaf-to-root step sequences; the empty
//!   proof is the structural "not a member" signal.
//! - **`TreeIndex`** — an append-only, insertion-ordered collection of
//!   trees resolving a block number or content hash to `(tree, header)`.
//!
//! Everything here is a pure, synchronous computation over in-memory data:
//! no I/O, no suspension points, no mutation after construction. The
//! upstream feed and batching policy are external collaborators that hand
//! over complete, already-materialized batches.
//!
//! ## Crate Policy
//!
//! - Depends only on `hproof-core` internally.
//! - No mocking of hash computation in tests — all tests build real trees
//!   over real SHA-256.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod index;
pub mod proof;
pub mod tree;

pub use index::{IndexHit, TreeIndex};
pub use proof::{Position, Proof, ProofStep};
pub use tree::MerkleTree;
