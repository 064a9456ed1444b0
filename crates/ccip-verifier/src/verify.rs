use alloy_primitives::B256;
use ccip_hasher::LeafHasher;
use ccip_merkle::{Proof, verify_compute_root};
use ccip_types::Message;
use tracing::{debug, warn};

use crate::error::{Result, VerifyError};

/// Leaf hashes of `messages` after checking that each one travels on the hasher's lane.
pub fn leaf_hashes(hasher: &LeafHasher, messages: &[Message]) -> Result<Vec<B256>> {
    let lane = hasher.lane();
    if let Some(message) = messages.iter().find(|m| {
        m.source_chain_selector != lane.source_chain_selector || m.dest_chain_selector != lane.dest_chain_selector
    }) {
        return Err(VerifyError::LaneMismatch {
            message_id: message.message_id,
            source_chain_selector: message.source_chain_selector,
            dest_chain_selector: message.dest_chain_selector,
            lane: lane.clone(),
        });
    }
    Ok(hasher.hash_all(messages)?)
}

/// Checks that `messages`, given in their committed order, are included in `expected_root`.
///
/// Returns the reconstructed root. Any difference from the committed root is an error: the
/// messages were not committed as given.
pub fn verify_messages(
    hasher: &LeafHasher,
    messages: &[Message],
    proof: &Proof,
    expected_root: B256,
) -> Result<B256> {
    let leaves = leaf_hashes(hasher, messages)?;
    let computed = verify_compute_root(&leaves, proof)?;
    if computed != expected_root {
        warn!(
            lane = %hasher.lane(),
            expected = %expected_root,
            computed = %computed,
            "messages do not match committed root"
        );
        return Err(VerifyError::RootMismatch {
            expected: expected_root,
            computed,
        });
    }

    debug!(lane = %hasher.lane(), leaves = leaves.len(), root = %computed, "verified messages");
    Ok(computed)
}
