use alloy_primitives::B256;
use ccip_types::{ChainFamily, Lane, Message};

use crate::args::evm_gas_limit;
use crate::error::Result;
use crate::leaf_hash;
use crate::packed::{self, PackedEncoder};

/// Metadata domain of messages executed on Aptos.
pub const ANY_2_APTOS_MESSAGE_HASH: &str = "Any2AptosMessageHashV1";

/// Leaf hasher of the Aptos off-ramp.
///
/// Aptos-bound messages carry EVM-shaped extra args, so the gas limit comes from
/// `EVMExtraArgsV1` or `GenericExtraArgsV2` even though the leaf itself is packed the Move way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptosLeafHasher {
    lane: Lane,
    metadata_hash: B256,
}

impl AptosLeafHasher {
    pub(crate) fn new(lane: Lane) -> Self {
        let metadata_hash = packed::metadata_hash(ANY_2_APTOS_MESSAGE_HASH, &lane);
        Self { lane, metadata_hash }
    }

    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    pub fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    pub fn hash(&self, message: &Message) -> Result<B256> {
        let gas_limit = evm_gas_limit(ChainFamily::Aptos, message)?;

        let mut inner = PackedEncoder::new();
        inner.fixed(message.message_id);
        inner.address("receiver", &message.receiver)?;
        inner.u64(message.sequence_number);
        inner.uint(gas_limit);
        inner.u64(message.nonce);

        let token_hash = packed::token_hash(&message.token_amounts)?;
        Ok(leaf_hash(self.metadata_hash, inner.keccak(), message, token_hash))
    }
}
