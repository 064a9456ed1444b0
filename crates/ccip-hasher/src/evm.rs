use alloy_primitives::{Address, B256, Bytes, keccak256};
use alloy_sol_types::{SolValue, sol};
use ccip_types::{ChainFamily, Lane, Message, TokenAmount};

use crate::args::evm_gas_limit;
use crate::error::{HasherError, Result};
use crate::leaf_hash;

/// Metadata domain of messages executed on EVM chains.
pub const ANY_2_EVM_MESSAGE_HASH: &str = "Any2EVMMessageHashV1";

sol! {
    /// Token transfer as the EVM off-ramp hashes it.
    struct Any2EVMTokenTransfer {
        bytes sourcePoolAddress;
        address destTokenAddress;
        uint32 destGasAmount;
        bytes extraData;
        uint256 amount;
    }
}

/// Leaf hasher of the EVM off-ramp, using Solidity ABI encoding throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmLeafHasher {
    lane: Lane,
    metadata_hash: B256,
}

impl EvmLeafHasher {
    pub(crate) fn new(lane: Lane) -> Self {
        let metadata_hash = keccak256(
            (
                keccak256(ANY_2_EVM_MESSAGE_HASH),
                lane.source_chain_selector,
                lane.dest_chain_selector,
                keccak256(&lane.on_ramp),
            )
                .abi_encode(),
        );
        Self { lane, metadata_hash }
    }

    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    pub fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    pub fn hash(&self, message: &Message) -> Result<B256> {
        let gas_limit = evm_gas_limit(ChainFamily::Evm, message)?;
        let receiver = evm_address("receiver", &message.receiver)?;
        let inner_hash = keccak256(
            (
                message.message_id,
                receiver,
                message.sequence_number,
                gas_limit,
                message.nonce,
            )
                .abi_encode(),
        );
        let token_hash = token_hash(&message.token_amounts)?;
        Ok(leaf_hash(self.metadata_hash, inner_hash, message, token_hash))
    }
}

fn token_hash(tokens: &[TokenAmount]) -> Result<B256> {
    let transfers = tokens
        .iter()
        .map(|token| -> Result<Any2EVMTokenTransfer> {
            Ok(Any2EVMTokenTransfer {
                sourcePoolAddress: token.source_pool_address.clone(),
                destTokenAddress: evm_address("destTokenAddress", &token.dest_token_address)?,
                destGasAmount: token.dest_gas_amount,
                extraData: token.extra_data.clone(),
                amount: token.amount,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(keccak256(transfers.abi_encode()))
}

/// Accepts a 20-byte address or its 32-byte ABI word form.
fn evm_address(field: &'static str, raw: &Bytes) -> Result<Address> {
    match raw.len() {
        20 => Ok(Address::from_slice(raw)),
        32 if raw[..12].iter().all(|b| *b == 0) => Ok(Address::from_slice(&raw[12..])),
        len => Err(HasherError::InvalidAddress { field, len, width: 20 }),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::test_utils::{evm_message, lane};

    #[test]
    fn test_known_leaf() {
        let hasher = EvmLeafHasher::new(lane());
        assert_eq!(
            hex::encode(hasher.metadata_hash()),
            "576fb24dc40aeb4ea8827edaf3ca845efb6f1d9458c9acb0bc1e0faa9037044c"
        );
        assert_eq!(
            hex::encode(hasher.hash(&evm_message()).unwrap()),
            "ac3b0c4c326379964e7aa253b14b4ecea6aa1a73f6b98067550c684a75068394"
        );
    }

    #[test]
    fn test_empty_token_list() {
        assert_eq!(
            hex::encode(token_hash(&[]).unwrap()),
            "569e75fc77c1a856f6daaf9e69d8a9566ca34aa47f9133711ce065a571af0cfd"
        );
    }

    #[test]
    fn test_padded_receiver_matches_raw() {
        let hasher = EvmLeafHasher::new(lane());
        let raw = evm_message();
        let mut padded = raw.clone();
        padded.receiver = B256::left_padding_from(&raw.receiver).0.to_vec().into();
        assert_eq!(hasher.hash(&padded).unwrap(), hasher.hash(&raw).unwrap());
    }

    #[test]
    fn test_receiver_width() {
        let hasher = EvmLeafHasher::new(lane());
        let mut message = evm_message();
        message.receiver = Bytes::from(vec![0x33; 32]);
        assert_eq!(
            hasher.hash(&message).unwrap_err(),
            HasherError::InvalidAddress {
                field: "receiver",
                len: 32,
                width: 20
            }
        );
        message.receiver = Bytes::from(vec![0x33; 19]);
        assert!(hasher.hash(&message).is_err());
    }

    #[test]
    fn test_gas_limit_changes_leaf() {
        let hasher = EvmLeafHasher::new(lane());
        let message = evm_message();
        let mut other = message.clone();
        other.gas_limit = Some(U256::from(200_001u64));
        assert_ne!(hasher.hash(&message).unwrap(), hasher.hash(&other).unwrap());
        other.gas_limit = Some(U256::from(200_000u64));
        assert_eq!(hasher.hash(&message).unwrap(), hasher.hash(&other).unwrap());
    }
}
