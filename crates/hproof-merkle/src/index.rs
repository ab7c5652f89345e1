//! # Tree Index
//!
//! `TreeIndex` holds an ordered, append-only collection of commitment
//! trees and resolves a lookup key — block number or content hash — to the
//! owning tree and matched header. Trees are scanned in insertion order
//! and the first match wins, so when a key is duplicated across batches
//! the earliest-registered tree is authoritative.
//!
//! The index is an explicit owned container: callers construct one and
//! register trees into it. There is no ambient registry.

use hproof_core::{BlockHeader, ContentHash};

use crate::tree::MerkleTree;

/// A successful index lookup: the owning tree and the matched header.
#[derive(Debug, Clone, Copy)]
pub struct IndexHit<'a> {
    /// The first-registered tree containing the key.
    pub tree: &'a MerkleTree,
    /// The matched header within that tree.
    pub header: &'a BlockHeader,
}

/// An ordered collection of commitment trees with linear key resolution.
///
/// Append-only: no removal, no re-indexing, no caching of negative
/// lookups — every query is O(total leaves) worst case. Registered trees
/// are immutable, so `&TreeIndex` queries are safe from any number of
/// threads; registering while other threads query requires external
/// synchronization (e.g. an `RwLock` around the index).
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    trees: Vec<MerkleTree>,
}

impl TreeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tree. No deduplication, no cap.
    pub fn register(&mut self, tree: MerkleTree) {
        self.trees.push(tree);
    }

    /// True iff no trees are registered.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of registered trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// The registered trees, in insertion order.
    pub fn trees(&self) -> &[MerkleTree] {
        &self.trees
    }

    /// Resolve a block number to its owning tree and header.
    ///
    /// Scans trees in insertion order, delegating to
    /// [`MerkleTree::find_by_number`]; returns on the first hit.
    pub fn query_by_number(&self, number: u64) -> Option<IndexHit<'_>> {
        self.trees.iter().find_map(|tree| {
            tree.find_by_number(number)
                .map(|header| IndexHit { tree, header })
        })
    }

    /// Resolve a content hash to its owning tree and header.
    ///
    /// Same scan pattern via [`MerkleTree::find_by_hash`].
    pub fn query_by_hash(&self, hash: &ContentHash) -> Option<IndexHit<'_>> {
        self.trees.iter().find_map(|tree| {
            tree.find_by_hash(hash)
                .map(|header| IndexHit { tree, header })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn hash_of(tag: &str) -> ContentHash {
        let digest = Sha256::digest(tag.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        ContentHash::from(bytes)
    }

    fn header(n: u64) -> BlockHeader {
        BlockHeader::new(
            n,
            hash_of(&format!("hash-{n}")),
            hash_of(&format!("parent-{n}")),
            hash_of(&format!("state-{n}")),
            hash_of(&format!("extrinsics-{n}")),
        )
    }

    fn tree_over(range: std::ops::Range<u64>) -> MerkleTree {
        MerkleTree::build(range.map(header).collect()).unwrap()
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = TreeIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.query_by_number(0).is_none());
    }

    #[test]
    fn test_query_by_number_across_trees() {
        let mut index = TreeIndex::new();
        index.register(tree_over(0..8));
        index.register(tree_over(8..16));
        index.register(tree_over(16..24));
        assert!(!index.is_empty());
        assert_eq!(index.len(), 3);

        let hit = index.query_by_number(11).expect("should resolve");
        assert_eq!(hit.header.number, 11);
        assert!(hit.tree.find_by_number(11).is_some());

        assert!(index.query_by_number(999).is_none());
    }

    #[test]
    fn test_query_by_hash_across_trees() {
        let mut index = TreeIndex::new();
        index.register(tree_over(0..8));
        index.register(tree_over(8..16));

        let wanted = header(13);
        let hit = index.query_by_hash(&wanted.hash).expect("should resolve");
        assert_eq!(hit.header, &wanted);

        assert!(index.query_by_hash(&hash_of("nowhere")).is_none());
    }

    #[test]
    fn test_duplicate_key_earliest_tree_wins() {
        // Tree B reuses number 3 with different content; the first-registered
        // tree containing the key is authoritative.
        let mut index = TreeIndex::new();
        let original = header(3);
        index.register(tree_over(0..8));

        let mut reused = header(100);
        reused.number = 3;
        let mut second_batch: Vec<BlockHeader> = (8..15).map(header).collect();
        second_batch.push(reused.clone());
        index.register(MerkleTree::build(second_batch).unwrap());

        let hit = index.query_by_number(3).expect("should resolve");
        assert_eq!(hit.header, &original);
        assert_ne!(hit.header, &reused);
    }

    #[test]
    fn test_hit_supports_proof_flow() {
        // The resolved tree can immediately serve a verifiable proof.
        let mut index = TreeIndex::new();
        index.register(tree_over(0..8));
        index.register(tree_over(8..16));

        let hit = index.query_by_number(10).unwrap();
        let proof = hit.tree.prove(hit.header);
        assert_eq!(proof.len(), hit.tree.depth() as usize);
        assert!(hit.tree.verify_proof(hit.header, &proof));
    }
}
