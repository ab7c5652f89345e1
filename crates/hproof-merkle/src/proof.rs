//! # Inclusion Proofs
//!
//! A proof is the minimal sequence of sibling hashes and directions needed
//! to recompute a tree's root from one leaf, demonstrating membership
//! without revealing the rest of the batch.
//!
//! Proofs are generated on demand, consumed immediately, and never cached.
//! They serialize with serde so they can travel to a third-party verifier,
//! and [`Proof::fold_root`] recomputes the commitment from a leaf hash and
//! the step sequence alone — no tree access required.

use serde::{Deserialize, Serialize};

use hproof_core::{combine_hashes, ContentHash};

/// Which side of its sibling pair the node at a step sits on.
///
/// `Left` means the node is the left child and the supplied sibling hash is
/// the right child, so the upward combination is `H(node || sibling)`;
/// `Right` is the mirror case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// The node is a left child; the sibling is to its right.
    Left,
    /// The node is a right child; the sibling is to its left.
    Right,
}

impl Position {
    /// True for [`Position::Right`].
    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right)
    }
}

/// One step on the path from a leaf to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Side of the sibling pair the current node lies on.
    pub position: Position,
    /// Hash of the sibling node supplied for the upward combination.
    pub sibling_hash: ContentHash,
    /// Flat index in the tree's node array this step starts from.
    pub index: usize,
}

/// An ordered sequence of steps from a leaf to the root.
///
/// The empty proof is the structural "not a member" signal: `prove` returns
/// it when the queried header is not in the batch, and it never verifies.
/// Non-empty proofs from a `2^k`-leaf tree have exactly `k` steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Steps in leaf-to-root order.
    pub steps: Vec<ProofStep>,
}

impl Proof {
    /// The empty (non-membership) proof.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the non-membership proof.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recompute the root commitment implied by this proof for a given
    /// leaf hash, without access to the tree.
    ///
    /// Returns `None` for the empty proof. A third party holding only a
    /// published root can check membership by comparing against
    /// `fold_root(sha256_hash(&header.canonical_bytes()?))`.
    pub fn fold_root(&self, leaf_hash: &ContentHash) -> Option<ContentHash> {
        if self.steps.is_empty() {
            return None;
        }
        let mut running = *leaf_hash;
        for step in &self.steps {
            running = match step.position {
                Position::Left => combine_hashes(&running, &step.sibling_hash),
                Position::Right => combine_hashes(&step.sibling_hash, &running),
            };
        }
        Some(running)
    }
}
