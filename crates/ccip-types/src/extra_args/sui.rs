use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::{ExtraArgsCodec, ExtraArgsError};

/// `bytes4(keccak256("CCIP SuiExtraArgsV1"))`
pub const SUI_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x21, 0xea, 0x4c, 0xa9];

/// Execution arguments for messages bound to Sui.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiExtraArgsV1 {
    pub gas_limit: u64,
    pub allow_out_of_order_execution: bool,
    pub token_receiver: B256,
    pub receiver_object_ids: Vec<B256>,
}

// BCS layout of the Move struct: vectors carry ULEB128 length prefixes.
#[derive(Serialize, Deserialize)]
struct SuiExtraArgsV1Wire {
    gas_limit: u64,
    allow_out_of_order_execution: bool,
    token_receiver: Vec<u8>,
    receiver_object_ids: Vec<Vec<u8>>,
}

fn to_b256(field: &'static str, bytes: &[u8]) -> Result<B256, ExtraArgsError> {
    if bytes.len() != 32 {
        return Err(ExtraArgsError::InvalidField {
            field,
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        });
    }
    Ok(B256::from_slice(bytes))
}

impl ExtraArgsCodec for SuiExtraArgsV1 {
    const TAG: [u8; 4] = SUI_EXTRA_ARGS_V1_TAG;
    const NAME: &'static str = "SuiExtraArgsV1";

    fn encode_body(&self) -> Result<Vec<u8>, ExtraArgsError> {
        let wire = SuiExtraArgsV1Wire {
            gas_limit: self.gas_limit,
            allow_out_of_order_execution: self.allow_out_of_order_execution,
            token_receiver: self.token_receiver.to_vec(),
            receiver_object_ids: self.receiver_object_ids.iter().map(|id| id.to_vec()).collect(),
        };
        bcs::to_bytes(&wire).map_err(|e| ExtraArgsError::Encode {
            variant: Self::NAME,
            reason: e.to_string(),
        })
    }

    fn decode_body(body: &[u8]) -> Result<Self, ExtraArgsError> {
        let wire: SuiExtraArgsV1Wire = bcs::from_bytes(body).map_err(|e| ExtraArgsError::Body {
            variant: Self::NAME,
            reason: e.to_string(),
        })?;
        let receiver_object_ids = wire
            .receiver_object_ids
            .iter()
            .map(|id| to_b256("receiverObjectIds", id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            gas_limit: wire.gas_limit,
            allow_out_of_order_execution: wire.allow_out_of_order_execution,
            token_receiver: to_b256("tokenReceiver", &wire.token_receiver)?,
            receiver_object_ids,
        })
    }
}
