use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use crate::MAX_NUMBER_TREE_LEAVES;
use crate::error::{MerkleError, Result};
use crate::hasher::{Hasher, Keccak256Ctx};

/// A compact multi-leaf inclusion proof.
///
/// `flags[i]` tells hashing step `i` where its first operand comes from: `true` takes the next
/// known value (a proven leaf, then computed parents in order), `false` takes the next entry of
/// `hashes`. The second operand is always the next known value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub hashes: Vec<B256>,
    pub flags: Vec<bool>,
}

impl Proof {
    pub fn new(hashes: Vec<B256>, flags: Vec<bool>) -> Self {
        Self { hashes, flags }
    }

    /// Number of steps that consume a proof hash.
    pub fn false_flags(&self) -> usize {
        self.flags.iter().filter(|flag| !**flag).count()
    }

    /// Packs the flags into the `uint256` bitmap taken by the off-ramp's manual execution, bit `i`
    /// set when `flags[i]` is `true`.
    pub fn flag_bits(&self) -> Result<U256> {
        if self.flags.len() > 256 {
            return Err(MerkleError::TooManyFlags {
                count: self.flags.len(),
            });
        }
        let bits = self
            .flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag)
            .fold(U256::ZERO, |acc, (i, _)| acc | (U256::from(1u8) << i));
        Ok(bits)
    }

    /// Inverse of [`Proof::flag_bits`] for a proof of `step_count` hashing steps.
    pub fn from_flag_bits(hashes: Vec<B256>, bits: U256, step_count: usize) -> Result<Self> {
        if step_count > 256 {
            return Err(MerkleError::TooManyFlags { count: step_count });
        }
        let flags = (0..step_count).map(|i| bits.bit(i)).collect();
        Ok(Self { hashes, flags })
    }
}

/// Recomputes the root that `leaves` and `proof` commit to with the keccak node hash.
pub fn verify_compute_root(leaves: &[B256], proof: &Proof) -> Result<B256> {
    verify_compute_root_with(&Keccak256Ctx, leaves, proof)
}

/// Recomputes the root that `leaves` and `proof` commit to.
///
/// `leaves` must be given in ascending tree order. The caller compares the returned root with the
/// committed one; this function only reports structurally broken proofs.
pub fn verify_compute_root_with<H: Hasher>(hasher: &H, leaves: &[B256], proof: &Proof) -> Result<B256> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyLeaves);
    }
    let false_flags = proof.false_flags();
    if false_flags != proof.hashes.len() {
        return Err(MerkleError::MalformedProof {
            false_flags,
            hashes: proof.hashes.len(),
        });
    }
    let total = leaves.len() + proof.hashes.len() - 1;
    if total > MAX_NUMBER_TREE_LEAVES {
        return Err(MerkleError::TooManyHashes {
            total,
            max: MAX_NUMBER_TREE_LEAVES,
        });
    }
    if proof.flags.len() != total {
        return Err(MerkleError::InvalidProof(format!(
            "{} source flags for {} leaves and {} proof hashes, expected {}",
            proof.flags.len(),
            leaves.len(),
            proof.hashes.len(),
            total
        )));
    }
    if total == 0 {
        return Ok(leaves[0]);
    }

    let mut known = KnownQueue::new(leaves, total);
    let mut proof_hashes = proof.hashes.iter();
    for &from_known in &proof.flags {
        let a = if from_known {
            known.pop()?
        } else {
            // counts were checked above
            *proof_hashes
                .next()
                .ok_or_else(|| MerkleError::InvalidProof("proof hashes exhausted".to_string()))?
        };
        let b = known.pop()?;
        known.push(hasher.hash_internal(a, b));
    }

    // with consistent counts every leaf and proof hash has been consumed here
    known.last()
}

/// Values already known during replay: the proven leaves first, then computed parents in the
/// order they were produced.
struct KnownQueue<'a> {
    leaves: &'a [B256],
    leaf_pos: usize,
    computed: Vec<B256>,
    hash_pos: usize,
}

impl<'a> KnownQueue<'a> {
    fn new(leaves: &'a [B256], capacity: usize) -> Self {
        Self {
            leaves,
            leaf_pos: 0,
            computed: Vec::with_capacity(capacity),
            hash_pos: 0,
        }
    }

    fn pop(&mut self) -> Result<B256> {
        if let Some(leaf) = self.leaves.get(self.leaf_pos) {
            self.leaf_pos += 1;
            return Ok(*leaf);
        }
        let value = self.computed.get(self.hash_pos).copied().ok_or_else(|| {
            MerkleError::InvalidProof(format!(
                "step reads intermediate hash {} before it is computed",
                self.hash_pos
            ))
        })?;
        self.hash_pos += 1;
        Ok(value)
    }

    fn push(&mut self, value: B256) {
        self.computed.push(value);
    }

    fn last(&self) -> Result<B256> {
        self.computed
            .last()
            .copied()
            .ok_or_else(|| MerkleError::InvalidProof("no hashing steps".to_string()))
    }
}
