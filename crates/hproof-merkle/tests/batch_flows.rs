//! # End-to-End Batch Flows
//!
//! Exercises the whole surface the way the surrounding system uses it: an
//! upstream feed delivers headers in arrival order, the caller cuts
//! power-of-two batches, builds a tree per batch, registers the trees in an
//! index, and later resolves a header, obtains a proof from its owning
//! tree, and hands the proof to a third-party verifier holding only the
//! published root.

use hproof_core::{sha256_hash, BlockHeader, ContentHash};
use hproof_merkle::{MerkleTree, Proof, TreeIndex};
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

/// Cut a stream of headers into fixed-size batches and register a tree per
/// batch, the way the (out-of-scope) feed plumbing does.
fn index_over(total: u64, batch_size: u64) -> TreeIndex {
    let mut index = TreeIndex::new();
    let mut pending = Vec::new();
    for n in 0..total {
        pending.push(header(n));
        if pending.len() as u64 == batch_size {
            index.register(MerkleTree::build(std::mem::take(&mut pending)).unwrap());
        }
    }
    index
}

#[test]
fn resolve_then_prove_then_verify() {
    let index = index_over(32, 8);
    assert_eq!(index.len(), 4);

    for n in [0u64, 7, 8, 19, 31] {
        let hit = index.query_by_number(n).expect("number should resolve");
        assert_eq!(hit.header.number, n);

        let proof = hit.tree.prove(hit.header);
        assert_eq!(proof.len(), 3);
        assert!(hit.tree.verify_proof(hit.header, &proof));
    }
}

#[test]
fn hash_key_resolves_in_hex_and_raw_forms() {
    let index = index_over(16, 8);
    let wanted = header(12);

    let by_raw = index
        .query_by_hash(&ContentHash::from(*wanted.hash.as_bytes()))
        .expect("raw key should resolve");
    let by_hex = index
        .query_by_hash(&wanted.hash.to_hex().parse().expect("hex should parse"))
        .expect("hex key should resolve");
    assert_eq!(by_raw.header, by_hex.header);
    assert_eq!(by_raw.header.number, 12);
}

#[test]
fn third_party_verifies_against_published_root_only() {
    let index = index_over(16, 8);
    let hit = index.query_by_number(5).unwrap();

    // The tree owner publishes the root and ships the proof as JSON.
    let published_root = hit.tree.root();
    let wire = serde_json::to_string(&hit.tree.prove(hit.header)).unwrap();

    // The verifier holds the header, the root, and the wire bytes — no tree.
    let proof: Proof = serde_json::from_str(&wire).unwrap();
    let leaf_hash = sha256_hash(&hit.header.canonical_bytes().unwrap());
    assert_eq!(proof.fold_root(&leaf_hash), Some(published_root));

    // A different header's leaf hash folds to a different commitment.
    let other = header(6);
    let other_leaf = sha256_hash(&other.canonical_bytes().unwrap());
    assert_ne!(proof.fold_root(&other_leaf), Some(published_root));
}

#[test]
fn tampered_wire_proof_fails_verification() {
    let index = index_over(8, 8);
    let hit = index.query_by_number(2).unwrap();
    let proof = hit.tree.prove(hit.header);

    let mut wire: serde_json::Value = serde_json::to_value(&proof).unwrap();
    let hex = wire["steps"][1]["sibling_hash"].as_str().unwrap().to_string();
    let flipped = if hex.starts_with('0') {
        format!("1{}", &hex[1..])
    } else {
        format!("0{}", &hex[1..])
    };
    wire["steps"][1]["sibling_hash"] = serde_json::json!(flipped);

    let tampered: Proof = serde_json::from_value(wire).unwrap();
    assert!(!hit.tree.verify_proof(hit.header, &tampered));

    let leaf_hash = sha256_hash(&hit.header.canonical_bytes().unwrap());
    assert_ne!(tampered.fold_root(&leaf_hash), Some(hit.tree.root()));
}

#[test]
fn unknown_header_is_absent_everywhere() {
    let index = index_over(16, 8);
    let stranger = header(9999);

    assert!(index.query_by_number(9999).is_none());
    assert!(index.query_by_hash(&stranger.hash).is_none());

    let tree = &index.trees()[0];
    assert!(tree.prove(&stranger).is_empty());
    assert!(!tree.verify(&stranger));
}

#[test]
fn batch_order_is_part_of_the_commitment() {
    let forward = MerkleTree::build((0..8).map(header).collect()).unwrap();
    let backward = MerkleTree::build((0..8).rev().map(header).collect()).unwrap();
    assert_ne!(forward.root(), backward.root());
}

#[test]
fn shared_tree_queries_from_multiple_threads() {
    // Built trees are immutable; read-only queries are safe in parallel.
    let tree = std::sync::Arc::new(MerkleTree::build((0..16).map(header).collect()).unwrap());
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || {
                for n in (t * 4)..(t * 4 + 4) {
                    let h = tree.find_by_number(n).expect("member");
                    assert!(tree.verify(h));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("query thread should not panic");
    }
}
