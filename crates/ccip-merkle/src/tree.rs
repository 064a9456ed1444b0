use alloy_primitives::B256;

use crate::MAX_NUMBER_TREE_LEAVES;
use crate::error::{MerkleError, Result};
use crate::hasher::{Hasher, Keccak256Ctx};
use crate::proof::Proof;

/// A padded binary Merkle tree over an ordered, non-empty list of leaf hashes.
///
/// `layers[0]` holds the leaves and `layers.last()` holds the root. Every layer except the root
/// has even length: an odd layer gets exactly one zero hash appended before pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree<H: Hasher = Keccak256Ctx> {
    hasher: H,
    leaf_count: usize,
    layers: Vec<Vec<B256>>,
}

impl MerkleTree<Keccak256Ctx> {
    pub fn new(leaves: Vec<B256>) -> Result<Self> {
        Self::with_hasher(Keccak256Ctx, leaves)
    }
}

impl<H: Hasher> MerkleTree<H> {
    pub fn with_hasher(hasher: H, leaves: Vec<B256>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyLeaves);
        }
        if leaves.len() > MAX_NUMBER_TREE_LEAVES {
            return Err(MerkleError::TooManyLeaves {
                count: leaves.len(),
                max: MAX_NUMBER_TREE_LEAVES,
            });
        }

        let leaf_count = leaves.len();
        let mut layers = Vec::new();
        let mut layer = leaves;
        while layer.len() > 1 {
            if layer.len() % 2 == 1 {
                layer.push(hasher.zero_hash());
            }
            let next = layer
                .chunks_exact(2)
                .map(|pair| hasher.hash_internal(pair[0], pair[1]))
                .collect();
            layers.push(layer);
            layer = next;
        }
        layers.push(layer);

        Ok(Self {
            hasher,
            leaf_count,
            layers,
        })
    }

    pub fn root(&self) -> B256 {
        // construction guarantees a final layer of exactly one node
        self.layers[self.layers.len() - 1][0]
    }

    /// The original leaves, without padding.
    pub fn leaves(&self) -> &[B256] {
        &self.layers[0][..self.leaf_count]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// All layers from the (padded) leaves up to the root.
    pub fn layers(&self) -> &[Vec<B256>] {
        &self.layers
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Builds a multi-proof for the leaves at `indices`.
    ///
    /// Indices are treated as a set; the proof replays against the selected leaves in ascending
    /// index order. At every layer each known node either pairs with its known sibling (flag
    /// `true`) or with a sibling hash taken from the tree (flag `false`), and the parents become
    /// the known nodes of the next layer.
    pub fn prove(&self, indices: &[usize]) -> Result<Proof> {
        if indices.is_empty() {
            return Err(MerkleError::EmptyIndices);
        }
        let mut known = indices.to_vec();
        known.sort_unstable();
        known.dedup();
        if let Some(&index) = known.last() {
            if index >= self.leaf_count {
                return Err(MerkleError::IndexOutOfRange {
                    index,
                    leaves: self.leaf_count,
                });
            }
        }

        let mut proof = Proof::default();
        for layer in &self.layers[..self.layers.len() - 1] {
            let mut parents = Vec::with_capacity(known.len());
            let mut i = 0;
            while i < known.len() {
                let index = known[i];
                let sibling = index ^ 1;
                if known.get(i + 1) == Some(&sibling) {
                    proof.flags.push(true);
                    i += 2;
                } else {
                    proof.flags.push(false);
                    proof.hashes.push(layer[sibling]);
                    i += 1;
                }
                parents.push(index / 2);
            }
            known = parents;
        }

        Ok(proof)
    }
}
