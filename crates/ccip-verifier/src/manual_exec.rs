use alloy_primitives::{B256, U256};
use ccip_hasher::LeafHasher;
use ccip_merkle::{MerkleTree, Proof};
use ccip_types::Message;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VerifyError};
use crate::verify::{leaf_hashes, verify_messages};

/// Arguments for the off-ramp's manual execution of messages from one committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualExecProof {
    /// Messages to execute, in batch order.
    pub messages: Vec<Message>,
    pub proofs: Vec<B256>,
    pub proof_flag_bits: U256,
    pub merkle_root: B256,
}

impl ManualExecProof {
    /// Unpacks the flag bitmap into a [`Proof`] over `messages`.
    pub fn proof(&self) -> Result<Proof> {
        let steps = (self.messages.len() + self.proofs.len()).saturating_sub(1);
        Ok(Proof::from_flag_bits(self.proofs.clone(), self.proof_flag_bits, steps)?)
    }

    /// Replays the proof for `messages` against `merkle_root`.
    pub fn verify(&self, hasher: &LeafHasher) -> Result<B256> {
        verify_messages(hasher, &self.messages, &self.proof()?, self.merkle_root)
    }
}

/// Builds the manual execution proof for `message_ids` out of the full committed `batch`.
///
/// `batch` must hold every message of the commit in sequence order. When `expected_root` is
/// given the rebuilt tree must match it.
pub fn manual_exec_proof(
    hasher: &LeafHasher,
    batch: &[Message],
    message_ids: &[B256],
    expected_root: Option<B256>,
) -> Result<ManualExecProof> {
    let tree = MerkleTree::new(leaf_hashes(hasher, batch)?)?;
    let merkle_root = tree.root();
    if let Some(expected) = expected_root {
        if expected != merkle_root {
            warn!(
                lane = %hasher.lane(),
                expected = %expected,
                computed = %merkle_root,
                "batch does not rebuild the committed root"
            );
            return Err(VerifyError::RootMismatch {
                expected,
                computed: merkle_root,
            });
        }
    }

    let mut indices = message_ids
        .iter()
        .map(|id| {
            batch
                .iter()
                .position(|message| message.message_id == *id)
                .ok_or(VerifyError::MessageNotFound(*id))
        })
        .collect::<Result<Vec<_>>>()?;
    indices.sort_unstable();
    indices.dedup();

    let proof = tree.prove(&indices)?;
    let proof_flag_bits = proof.flag_bits()?;
    info!(
        lane = %hasher.lane(),
        messages = indices.len(),
        batch = batch.len(),
        root = %merkle_root,
        "built manual execution proof"
    );

    Ok(ManualExecProof {
        messages: indices.iter().map(|&i| batch[i].clone()).collect(),
        proofs: proof.hashes,
        proof_flag_bits,
        merkle_root,
    })
}
