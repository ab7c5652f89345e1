//! # Batch Commitment Tree
//!
//! `MerkleTree` owns one immutable batch of block headers and commits to it
//! with a binary SHA-256 hash tree stored as a single flat node array:
//! layer 0 holds the leaf hashes at `[0, n)`, each parent layer follows,
//! and the root is the final element. A tree over `n = 2^k` leaves holds
//! exactly `2n - 1` node hashes.
//!
//! Construction validates the batch-size precondition up front and is total
//! afterwards; the tree is never mutated once built, so shared references
//! can be queried from any number of threads.

use serde_json::Value;

use hproof_core::{
    combine_hashes, sha256_hash, BatchError, BlockHeader, CanonicalBytes, CanonicalizationError,
    ContentHash,
};

use crate::proof::{Position, Proof, ProofStep};

/// An immutable hash tree over one power-of-two batch of headers.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// The batch, in feed order. Leaf order is significant: reordering the
    /// batch changes the root.
    headers: Vec<BlockHeader>,
    /// Canonical leaf encodings, parallel to `headers`.
    leaves: Vec<CanonicalBytes>,
    /// Flat node array: leaf hashes, then each parent layer, root last.
    node_hashes: Vec<ContentHash>,
    /// Number of layers above the leaf layer: `log2(n)`.
    depth: u32,
}

impl MerkleTree {
    /// Build a tree from a completed batch.
    ///
    /// The batch must hold `2^k` headers with `k >= 1`; construction does
    /// not pad. Violations fail with the matching [`BatchError`] variant
    /// rather than producing a malformed tree.
    ///
    /// # Errors
    ///
    /// [`BatchError::Empty`], [`BatchError::TooSmall`] or
    /// [`BatchError::NotPowerOfTwo`] on a bad batch length;
    /// [`BatchError::Canonicalization`] if a header cannot be canonically
    /// encoded.
    pub fn build(headers: Vec<BlockHeader>) -> Result<Self, BatchError> {
        let n = headers.len();
        match n {
            0 => return Err(BatchError::Empty),
            1 => return Err(BatchError::TooSmall(n)),
            _ if !n.is_power_of_two() => return Err(BatchError::NotPowerOfTwo(n)),
            _ => {}
        }

        let leaves = headers
            .iter()
            .map(BlockHeader::canonical_bytes)
            .collect::<Result<Vec<_>, _>>()?;

        let mut node_hashes: Vec<ContentHash> = Vec::with_capacity(2 * n - 1);
        node_hashes.extend(leaves.iter().map(sha256_hash));

        // Build parent layers bottom-up over adjacent pairs. Offsets into
        // the flat array: layer 0 at [0, n), layer 1 at [n, n + n/2), and
        // so on until the single root.
        let mut base = 0;
        let mut len = n;
        while len > 1 {
            for i in (0..len).step_by(2) {
                let parent = combine_hashes(&node_hashes[base + i], &node_hashes[base + i + 1]);
                node_hashes.push(parent);
            }
            base += len;
            len /= 2;
        }

        let depth = n.trailing_zeros();
        Ok(Self {
            headers,
            leaves,
            node_hashes,
            depth,
        })
    }

    /// Number of leaves (headers) in the batch.
    pub fn leaf_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of layers above the leaf layer.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The public commitment to the whole batch.
    pub fn root(&self) -> ContentHash {
        // Non-empty by the build precondition.
        self.node_hashes[self.node_hashes.len() - 1]
    }

    /// The batch, in leaf order.
    pub fn headers(&self) -> &[BlockHeader] {
        &self.headers
    }

    /// The header at a leaf position, if in range.
    pub fn header_at(&self, leaf_index: usize) -> Option<&BlockHeader> {
        self.headers.get(leaf_index)
    }

    /// The canonical leaf encoding at a leaf position, if in range.
    pub fn leaf_at(&self, leaf_index: usize) -> Option<&CanonicalBytes> {
        self.leaves.get(leaf_index)
    }

    /// Human-readable JSON projections of every leaf, in batch order.
    pub fn human_leaves(&self) -> Result<Vec<Value>, CanonicalizationError> {
        self.headers.iter().map(BlockHeader::human).collect()
    }

    /// Look up a header by block number (strict equality).
    ///
    /// Linear scan in leaf order; if the batch violates the upstream
    /// uniqueness contract, the first match wins.
    pub fn find_by_number(&self, number: u64) -> Option<&BlockHeader> {
        self.headers.iter().find(|h| h.number == number)
    }

    /// Look up a header by its upstream content hash.
    ///
    /// Hex-string keys parse through [`ContentHash::from_hex`], raw
    /// 32-byte keys convert through `ContentHash::from`; both reach the
    /// same header. First match wins.
    pub fn find_by_hash(&self, hash: &ContentHash) -> Option<&BlockHeader> {
        self.headers.iter().find(|h| h.hash == *hash)
    }

    /// Generate an inclusion proof for a header.
    ///
    /// The header is re-encoded with the same canonicalization as
    /// construction and matched byte-exactly against the stored leaves.
    /// Absence — including a header that cannot be canonically encoded —
    /// yields the empty proof, not an error.
    pub fn prove(&self, header: &BlockHeader) -> Proof {
        let Ok(target) = header.canonical_bytes() else {
            return Proof::empty();
        };
        match self.leaves.iter().position(|leaf| *leaf == target) {
            Some(leaf_index) => self.prove_leaf(leaf_index),
            None => Proof::empty(),
        }
    }

    /// Generate an inclusion proof for a known leaf position.
    ///
    /// Skips the leaf scan; used when the caller already located the leaf.
    /// Out-of-range positions yield the empty proof.
    pub fn prove_leaf(&self, leaf_index: usize) -> Proof {
        let n = self.leaf_count();
        if leaf_index >= n {
            return Proof::empty();
        }

        let mut steps = Vec::with_capacity(self.depth as usize);
        let mut base = 0;
        let mut len = n;
        let mut pos = leaf_index;
        for _ in 0..self.depth {
            let position = if pos % 2 == 1 {
                Position::Right
            } else {
                Position::Left
            };
            steps.push(ProofStep {
                position,
                sibling_hash: self.node_hashes[base + (pos ^ 1)],
                index: base + pos,
            });
            base += len;
            len /= 2;
            pos /= 2;
        }
        Proof { steps }
    }

    /// Check membership of a header by deriving and verifying its proof.
    pub fn verify(&self, header: &BlockHeader) -> bool {
        self.verify_proof(header, &self.prove(header))
    }

    /// Verify a caller-supplied proof for a header against this tree's
    /// stored hashes.
    ///
    /// Every step must hold for the verdict to be true: the step indices
    /// must chain from the leaf layer to the root, each step's position
    /// must agree with its index parity, each recomputed parent hash must
    /// equal the stored value, and the final value must equal the root.
    /// The empty proof (the not-found signal) verifies false.
    pub fn verify_proof(&self, header: &BlockHeader, proof: &Proof) -> bool {
        let n = self.leaf_count();
        if proof.len() != self.depth as usize {
            return false;
        }
        let Ok(leaf) = header.canonical_bytes() else {
            return false;
        };
        // depth >= 1, so steps[0] exists past the length check above.
        if proof.steps[0].index >= n {
            return false;
        }

        let mut running = sha256_hash(&leaf);
        let mut base = 0;
        let mut len = n;
        let mut pos = proof.steps[0].index;
        let mut ok = true;
        for step in &proof.steps {
            // Structural validity: the step must sit where the chain from
            // the claimed leaf says it sits, on the side its index implies.
            if step.index != base + pos || step.position.is_right() != (pos % 2 == 1) {
                return false;
            }
            running = match step.position {
                Position::Left => combine_hashes(&running, &step.sibling_hash),
                Position::Right => combine_hashes(&step.sibling_hash, &running),
            };
            pos /= 2;
            base += len;
            len /= 2;
            // Fold the verdict across every step; a mismatched parent hash
            // anywhere makes the whole verification false.
            ok &= running == self.node_hashes[base + pos];
        }
        ok && running == self.root()
    }
}
