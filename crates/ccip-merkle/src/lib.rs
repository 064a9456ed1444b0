//! Compact multi-proof Merkle tree used to prove that message leaves belong to a committed root.
//!
//! Layers are built by pairing adjacent nodes in order; an odd layer is padded with a single
//! [`ZERO_HASH`]. Proofs are a list of sibling hashes plus one source flag per hashing step and
//! replay against the leaves alone, without leaf indices, which is what the on-chain verifier
//! consumes.

pub mod error;
pub mod hasher;
pub mod proof;
pub mod tree;

pub use error::{MerkleError, Result};
pub use hasher::{Hasher, INTERNAL_DOMAIN_SEPARATOR, Keccak256Ctx, LEAF_DOMAIN_SEPARATOR, ZERO_HASH, hash_internal};
pub use proof::{Proof, verify_compute_root, verify_compute_root_with};
pub use tree::MerkleTree;

/// Largest number of leaves, and of hashing steps in a proof, the on-chain verifier accepts.
pub const MAX_NUMBER_TREE_LEAVES: usize = 256;
