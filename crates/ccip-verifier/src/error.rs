use alloy_primitives::{B256, Bytes};
use ccip_hasher::HasherError;
use ccip_merkle::MerkleError;
use ccip_types::Lane;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VerifyError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("leaf hashing failed: {0}")]
    Hasher(#[from] HasherError),

    #[error("merkle proof failed: {0}")]
    Merkle(#[from] MerkleError),

    #[error("root mismatch: expected {expected}, computed {computed}")]
    RootMismatch { expected: B256, computed: B256 },

    #[error("message {0} is not part of the batch")]
    MessageNotFound(B256),

    #[error("no hasher registered for lane {source_chain_selector} -> {dest_chain_selector} with on-ramp {on_ramp}")]
    UnknownLane {
        source_chain_selector: u64,
        dest_chain_selector: u64,
        on_ramp: Bytes,
    },

    #[error("message {message_id} travels {source_chain_selector} -> {dest_chain_selector}, not on lane {lane}")]
    LaneMismatch {
        message_id: B256,
        source_chain_selector: u64,
        dest_chain_selector: u64,
        lane: Lane,
    },
}
