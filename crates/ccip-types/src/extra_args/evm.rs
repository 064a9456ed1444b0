use alloy_primitives::U256;
use alloy_sol_types::{SolValue, sol};
use serde::{Deserialize, Serialize};

use super::{ExtraArgsCodec, ExtraArgsError};

/// `bytes4(keccak256("CCIP EVMExtraArgsV1"))`
pub const EVM_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x97, 0xa6, 0x57, 0xc9];
/// `bytes4(keccak256("CCIP EVMExtraArgsV2"))`, shared by every family as `GenericExtraArgsV2`.
pub const EVM_EXTRA_ARGS_V2_TAG: [u8; 4] = [0x18, 0x1d, 0xcf, 0x10];

mod abi {
    use super::sol;

    sol! {
        struct EVMExtraArgsV1 {
            uint256 gasLimit;
        }

        struct GenericExtraArgsV2 {
            uint256 gasLimit;
            bool allowOutOfOrderExecution;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmExtraArgsV1 {
    pub gas_limit: U256,
}

impl EvmExtraArgsV1 {
    pub fn new(gas_limit: U256) -> Self {
        Self { gas_limit }
    }
}

impl ExtraArgsCodec for EvmExtraArgsV1 {
    const TAG: [u8; 4] = EVM_EXTRA_ARGS_V1_TAG;
    const NAME: &'static str = "EVMExtraArgsV1";

    fn encode_body(&self) -> Result<Vec<u8>, ExtraArgsError> {
        Ok(abi::EVMExtraArgsV1 {
            gasLimit: self.gas_limit,
        }
        .abi_encode())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ExtraArgsError> {
        let decoded = abi::EVMExtraArgsV1::abi_decode(body).map_err(|e| ExtraArgsError::Body {
            variant: Self::NAME,
            reason: e.to_string(),
        })?;
        Ok(Self {
            gas_limit: decoded.gasLimit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmExtraArgsV2 {
    pub gas_limit: U256,
    pub allow_out_of_order_execution: bool,
}

impl EvmExtraArgsV2 {
    pub fn new(gas_limit: U256, allow_out_of_order_execution: bool) -> Self {
        Self {
            gas_limit,
            allow_out_of_order_execution,
        }
    }
}

impl ExtraArgsCodec for EvmExtraArgsV2 {
    const TAG: [u8; 4] = EVM_EXTRA_ARGS_V2_TAG;
    const NAME: &'static str = "GenericExtraArgsV2";

    fn encode_body(&self) -> Result<Vec<u8>, ExtraArgsError> {
        Ok(abi::GenericExtraArgsV2 {
            gasLimit: self.gas_limit,
            allowOutOfOrderExecution: self.allow_out_of_order_execution,
        }
        .abi_encode())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ExtraArgsError> {
        let decoded = abi::GenericExtraArgsV2::abi_decode(body).map_err(|e| ExtraArgsError::Body {
            variant: Self::NAME,
            reason: e.to_string(),
        })?;
        Ok(Self {
            gas_limit: decoded.gasLimit,
            allow_out_of_order_execution: decoded.allowOutOfOrderExecution,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{FixedBytes, keccak256};

    use super::*;

    #[test]
    fn test_tags_match_protocol_strings() {
        assert_eq!(keccak256("CCIP EVMExtraArgsV1")[..4], EVM_EXTRA_ARGS_V1_TAG);
        assert_eq!(keccak256("CCIP EVMExtraArgsV2")[..4], EVM_EXTRA_ARGS_V2_TAG);
    }

    #[test]
    fn test_v2_wire_layout() {
        let encoded = EvmExtraArgsV2::new(U256::from(200_000u64), true).encode().unwrap();
        let expected = hex::decode(concat!(
            "181dcf10",
            "0000000000000000000000000000000000000000000000000000000000030d40",
            "0000000000000000000000000000000000000000000000000000000000000001",
        ))
        .unwrap();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_v1_wire_layout() {
        let encoded = EvmExtraArgsV1::new(U256::from(0x1234u64)).encode().unwrap();
        assert_eq!(encoded.len(), 36);
        assert_eq!(&encoded[..4], &EVM_EXTRA_ARGS_V1_TAG);
        assert_eq!(&encoded[34..], &[0x12, 0x34]);
        assert_eq!(EvmExtraArgsV1::decode(&encoded).unwrap().gas_limit, U256::from(0x1234u64));
    }

    #[test]
    fn test_truncated_body_rejected() {
        let mut encoded = EvmExtraArgsV2::new(U256::from(1u64), false).encode().unwrap();
        encoded.truncate(4 + 40);
        assert!(matches!(
            EvmExtraArgsV2::decode(&encoded),
            Err(ExtraArgsError::Body {
                variant: "GenericExtraArgsV2",
                ..
            })
        ));
    }

    #[test]
    fn test_v1_tag_rejected_by_v2_decoder() {
        let encoded = EvmExtraArgsV1::new(U256::from(1u64)).encode().unwrap();
        assert_eq!(
            EvmExtraArgsV2::decode(&encoded).unwrap_err(),
            ExtraArgsError::TagMismatch {
                expected: FixedBytes::from(EVM_EXTRA_ARGS_V2_TAG),
                found: FixedBytes::from(EVM_EXTRA_ARGS_V1_TAG),
            }
        );
    }
}
