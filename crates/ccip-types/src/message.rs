use alloy_primitives::{B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::extra_args::{ExtraArgs, ExtraArgsError};

/// A token transfer carried by a message, as seen by the destination chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub source_pool_address: Bytes,
    pub dest_token_address: Bytes,
    pub dest_gas_amount: u32,
    pub extra_data: Bytes,
    pub amount: U256,
}

/// Family-agnostic cross-chain message record.
///
/// `sender` and `receiver` keep the raw bytes of their family's native address width. `gas_limit`
/// and `token_receiver` are only set when the ingestion layer already decoded them; otherwise the
/// hashers recover them from `extra_args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: B256,
    pub source_chain_selector: u64,
    pub dest_chain_selector: u64,
    pub sequence_number: u64,
    pub nonce: u64,
    pub sender: Bytes,
    pub receiver: Bytes,
    pub data: Bytes,
    #[serde(default)]
    pub token_amounts: Vec<TokenAmount>,
    pub extra_args: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_receiver: Option<Bytes>,
}

impl Message {
    /// Decodes the opaque `extra_args` blob by its tag.
    pub fn decode_extra_args(&self) -> Result<ExtraArgs, ExtraArgsError> {
        ExtraArgs::decode(&self.extra_args)
    }
}
