use alloy_primitives::{B256, U256};
use ccip_types::{ChainFamily, ExtraArgs, Lane, Message};

use crate::error::{HasherError, Result};
use crate::leaf_hash;
use crate::packed::{self, PackedEncoder};

/// Metadata domain of messages executed on Sui.
pub const ANY_2_SUI_MESSAGE_HASH: &str = "Any2SuiMessageHashV1";

/// Leaf hasher of the Sui off-ramp. The inner hash carries the token receiver between the gas
/// limit and the nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiLeafHasher {
    lane: Lane,
    metadata_hash: B256,
}

impl SuiLeafHasher {
    pub(crate) fn new(lane: Lane) -> Self {
        let metadata_hash = packed::metadata_hash(ANY_2_SUI_MESSAGE_HASH, &lane);
        Self { lane, metadata_hash }
    }

    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    pub fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    pub fn hash(&self, message: &Message) -> Result<B256> {
        let (gas_limit, token_receiver) = gas_and_token_receiver(message)?;

        let mut inner = PackedEncoder::new();
        inner.fixed(message.message_id);
        inner.address("receiver", &message.receiver)?;
        inner.u64(message.sequence_number);
        inner.uint(gas_limit);
        inner.fixed(token_receiver);
        inner.u64(message.nonce);

        let token_hash = packed::token_hash(&message.token_amounts)?;
        Ok(leaf_hash(self.metadata_hash, inner.keccak(), message, token_hash))
    }
}

/// Fields set on the message win over `SuiExtraArgsV1`; the blob is only decoded when one of them
/// is missing.
fn gas_and_token_receiver(message: &Message) -> Result<(U256, B256)> {
    let token_receiver = message
        .token_receiver
        .as_ref()
        .map(|raw| packed::left_pad("tokenReceiver", raw))
        .transpose()?;
    if let (Some(gas_limit), Some(token_receiver)) = (message.gas_limit, token_receiver) {
        return Ok((gas_limit, token_receiver));
    }

    match message.decode_extra_args()? {
        ExtraArgs::SuiV1(args) => Ok((
            message.gas_limit.unwrap_or(U256::from(args.gas_limit)),
            token_receiver.unwrap_or(args.token_receiver),
        )),
        other => Err(HasherError::MissingField {
            family: ChainFamily::Sui,
            field: if other.gas_limit().is_some() { "tokenReceiver" } else { "gasLimit" },
            variant: other.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Bytes;
    use ccip_types::{EvmExtraArgsV2, ExtraArgsCodec};

    use super::*;
    use crate::test_utils::{lane, sui_message};

    const KNOWN_LEAF: &str = "150328b34a39f1c340c73dca24d11c5051655007a5f2175ac4a92c0224e35c8c";

    #[test]
    fn test_known_leaf() {
        let hasher = SuiLeafHasher::new(lane());
        assert_eq!(
            hex::encode(hasher.metadata_hash()),
            "8388ebccb54ca20f5115fc1c0ce59563c1ae37c68ab8ef1b7e8ae64274955316"
        );
        assert_eq!(hex::encode(hasher.hash(&sui_message()).unwrap()), KNOWN_LEAF);
    }

    #[test]
    fn test_message_fields_skip_extra_args() {
        let hasher = SuiLeafHasher::new(lane());
        let mut message = sui_message();
        message.extra_args = Bytes::new();
        message.gas_limit = Some(U256::from(101u64));
        message.token_receiver = Some(Bytes::from(vec![0x77; 32]));
        assert_eq!(hex::encode(hasher.hash(&message).unwrap()), KNOWN_LEAF);
    }

    #[test]
    fn test_token_receiver_is_hashed() {
        let hasher = SuiLeafHasher::new(lane());
        let mut message = sui_message();
        message.token_receiver = Some(Bytes::from(vec![0x78; 32]));
        assert_ne!(hex::encode(hasher.hash(&message).unwrap()), KNOWN_LEAF);
    }

    #[test]
    fn test_evm_args_lack_token_receiver() {
        let hasher = SuiLeafHasher::new(lane());
        let mut message = sui_message();
        message.extra_args = EvmExtraArgsV2::new(U256::from(101u64), true).encode().unwrap().into();
        assert_eq!(
            hasher.hash(&message).unwrap_err(),
            HasherError::MissingField {
                family: ChainFamily::Sui,
                field: "tokenReceiver",
                variant: "GenericExtraArgsV2"
            }
        );
    }

    #[test]
    fn test_wide_token_receiver() {
        let mut message = sui_message();
        message.token_receiver = Some(Bytes::from(vec![1; 33]));
        assert_eq!(
            gas_and_token_receiver(&message).unwrap_err(),
            HasherError::InvalidAddress {
                field: "tokenReceiver",
                len: 33,
                width: 32
            }
        );
    }
}
