//! Reduces a CCIP message to the leaf hash the destination off-ramp recomputes on chain.
//!
//! Every family shares the same leaf shape:
//!
//! ```text
//! leaf = keccak256(LEAF_DOMAIN_SEPARATOR || metadataHash || innerHash || keccak256(sender)
//!                  || keccak256(data) || tokenHash)
//! ```
//!
//! The families differ in the version string mixed into `metadataHash`, in how fields are packed
//! and in where the gas limit and token receiver come from.

use alloy_primitives::{B256, Keccak256, keccak256};
use ccip_merkle::LEAF_DOMAIN_SEPARATOR;
use ccip_types::{ChainFamily, Lane, Message, ProtocolVersion};
use tracing::debug;

mod args;
pub mod aptos;
pub mod error;
pub mod evm;
mod packed;
pub mod sui;

pub use aptos::{ANY_2_APTOS_MESSAGE_HASH, AptosLeafHasher};
pub use error::{HasherError, Result};
pub use evm::{ANY_2_EVM_MESSAGE_HASH, EvmLeafHasher};
pub use sui::{ANY_2_SUI_MESSAGE_HASH, SuiLeafHasher};

/// Leaf hasher for one lane, selected by destination family and protocol version.
///
/// The lane's metadata hash is computed once at construction and reused for every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafHasher {
    Evm(EvmLeafHasher),
    Aptos(AptosLeafHasher),
    Sui(SuiLeafHasher),
}

impl LeafHasher {
    pub fn new(dest_family: ChainFamily, lane: Lane) -> Result<Self> {
        let hasher = match (dest_family, lane.version) {
            (ChainFamily::Evm, ProtocolVersion::V1_6) => LeafHasher::Evm(EvmLeafHasher::new(lane)),
            (ChainFamily::Aptos, ProtocolVersion::V1_6) => LeafHasher::Aptos(AptosLeafHasher::new(lane)),
            (ChainFamily::Sui, ProtocolVersion::V1_6) => LeafHasher::Sui(SuiLeafHasher::new(lane)),
            (family, version) => return Err(HasherError::UnsupportedProtocolVersion { family, version }),
        };
        debug!(
            family = %dest_family,
            lane = %hasher.lane(),
            metadata_hash = %hasher.metadata_hash(),
            "created leaf hasher"
        );
        Ok(hasher)
    }

    pub fn family(&self) -> ChainFamily {
        match self {
            LeafHasher::Evm(_) => ChainFamily::Evm,
            LeafHasher::Aptos(_) => ChainFamily::Aptos,
            LeafHasher::Sui(_) => ChainFamily::Sui,
        }
    }

    pub fn lane(&self) -> &Lane {
        match self {
            LeafHasher::Evm(h) => h.lane(),
            LeafHasher::Aptos(h) => h.lane(),
            LeafHasher::Sui(h) => h.lane(),
        }
    }

    pub fn metadata_hash(&self) -> B256 {
        match self {
            LeafHasher::Evm(h) => h.metadata_hash(),
            LeafHasher::Aptos(h) => h.metadata_hash(),
            LeafHasher::Sui(h) => h.metadata_hash(),
        }
    }

    /// Leaf hash of one message. Extra args are decoded before anything is hashed.
    pub fn hash(&self, message: &Message) -> Result<B256> {
        match self {
            LeafHasher::Evm(h) => h.hash(message),
            LeafHasher::Aptos(h) => h.hash(message),
            LeafHasher::Sui(h) => h.hash(message),
        }
    }

    /// Leaf hashes of a batch, in input order. Fails on the first message that cannot be hashed.
    pub fn hash_all(&self, messages: &[Message]) -> Result<Vec<B256>> {
        messages.iter().map(|message| self.hash(message)).collect()
    }
}

pub(crate) fn leaf_hash(metadata_hash: B256, inner_hash: B256, message: &Message, token_hash: B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(LEAF_DOMAIN_SEPARATOR);
    hasher.update(metadata_hash);
    hasher.update(inner_hash);
    hasher.update(keccak256(&message.sender));
    hasher.update(keccak256(&message.data));
    hasher.update(token_hash);
    hasher.finalize()
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_primitives::{B256, Bytes, U256};
    use ccip_types::{EvmExtraArgsV2, ExtraArgsCodec, Lane, Message, ProtocolVersion, SuiExtraArgsV1, TokenAmount};

    pub(crate) fn lane() -> Lane {
        Lane::new(
            5009297550715157269,
            4741433654826277614,
            Bytes::from(vec![0x99; 20]),
            ProtocolVersion::V1_6,
        )
    }

    fn message(address_width: usize, extra_args: Vec<u8>) -> Message {
        Message {
            message_id: B256::repeat_byte(0x11),
            source_chain_selector: 5009297550715157269,
            dest_chain_selector: 4741433654826277614,
            sequence_number: 42,
            nonce: 7,
            sender: Bytes::from(vec![0x22; 20]),
            receiver: Bytes::from(vec![0x33; address_width]),
            data: Bytes::from_static(b"hello"),
            token_amounts: vec![TokenAmount {
                source_pool_address: Bytes::from(vec![0x44; 20]),
                dest_token_address: Bytes::from(vec![0x55; address_width]),
                dest_gas_amount: 90_000,
                extra_data: Bytes::from(vec![0x66; 33]),
                amount: U256::from(1_000_000u64),
            }],
            extra_args: extra_args.into(),
            gas_limit: None,
            token_receiver: None,
        }
    }

    fn evm_args() -> Vec<u8> {
        EvmExtraArgsV2::new(U256::from(200_000u64), true)
            .encode()
            .unwrap()
    }

    pub(crate) fn evm_message() -> Message {
        message(20, evm_args())
    }

    /// Aptos-bound message: 32-byte addresses with EVM-shaped extra args.
    pub(crate) fn move_message() -> Message {
        message(32, evm_args())
    }

    pub(crate) fn sui_message() -> Message {
        let args = SuiExtraArgsV1 {
            gas_limit: 101,
            allow_out_of_order_execution: true,
            token_receiver: B256::repeat_byte(0x77),
            receiver_object_ids: vec![B256::repeat_byte(0x88)],
        };
        message(32, args.encode().unwrap())
    }
}
