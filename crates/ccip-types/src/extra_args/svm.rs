use alloy_primitives::Bytes;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::{ExtraArgsCodec, ExtraArgsError};

/// `bytes4(keccak256("CCIP SVMExtraArgsV1"))`
pub const SVM_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x1f, 0x3b, 0x3a, 0xba];

/// Execution arguments for messages bound to an SVM chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvmExtraArgsV1 {
    pub compute_units: u64,
    /// Bit `i` marks `accounts[i]` as writable.
    pub account_is_writable_bitmap: u64,
    pub allow_out_of_order_execution: bool,
    pub token_receiver: Bytes,
    pub accounts: Vec<Bytes>,
}

/// Borsh layout: little-endian integers, one byte bools, `u32` length prefixes.
#[derive(BorshSerialize, BorshDeserialize)]
struct SvmExtraArgsV1Wire {
    compute_units: u64,
    account_is_writable_bitmap: u64,
    allow_out_of_order_execution: bool,
    token_receiver: Vec<u8>,
    accounts: Vec<Vec<u8>>,
}

impl From<&SvmExtraArgsV1> for SvmExtraArgsV1Wire {
    fn from(args: &SvmExtraArgsV1) -> Self {
        Self {
            compute_units: args.compute_units,
            account_is_writable_bitmap: args.account_is_writable_bitmap,
            allow_out_of_order_execution: args.allow_out_of_order_execution,
            token_receiver: args.token_receiver.to_vec(),
            accounts: args.accounts.iter().map(|a| a.to_vec()).collect(),
        }
    }
}

impl From<SvmExtraArgsV1Wire> for SvmExtraArgsV1 {
    fn from(wire: SvmExtraArgsV1Wire) -> Self {
        Self {
            compute_units: wire.compute_units,
            account_is_writable_bitmap: wire.account_is_writable_bitmap,
            allow_out_of_order_execution: wire.allow_out_of_order_execution,
            token_receiver: Bytes::from(wire.token_receiver),
            accounts: wire.accounts.into_iter().map(Bytes::from).collect(),
        }
    }
}

impl ExtraArgsCodec for SvmExtraArgsV1 {
    const TAG: [u8; 4] = SVM_EXTRA_ARGS_V1_TAG;
    const NAME: &'static str = "SVMExtraArgsV1";

    fn encode_body(&self) -> Result<Vec<u8>, ExtraArgsError> {
        borsh::to_vec(&SvmExtraArgsV1Wire::from(self)).map_err(|e| ExtraArgsError::Encode {
            variant: Self::NAME,
            reason: e.to_string(),
        })
    }

    fn decode_body(body: &[u8]) -> Result<Self, ExtraArgsError> {
        let wire: SvmExtraArgsV1Wire = borsh::from_slice(body).map_err(|e| ExtraArgsError::Body {
            variant: Self::NAME,
            reason: e.to_string(),
        })?;
        Ok(wire.into())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample() -> SvmExtraArgsV1 {
        SvmExtraArgsV1 {
            compute_units: 300_000,
            account_is_writable_bitmap: 2,
            allow_out_of_order_execution: true,
            token_receiver: Bytes::from(vec![0xab; 32]),
            accounts: vec![Bytes::from(vec![0x01; 32]), Bytes::from(vec![0x02; 32])],
        }
    }

    #[test]
    fn test_wire_layout() {
        let encoded = sample().encode().unwrap();
        assert_eq!(&encoded[..4], &SVM_EXTRA_ARGS_V1_TAG);
        let body = &encoded[4..];
        assert_eq!(&body[0..8], &300_000u64.to_le_bytes());
        assert_eq!(&body[8..16], &2u64.to_le_bytes());
        assert_eq!(body[16], 1);
        assert_eq!(&body[17..21], &32u32.to_le_bytes());
        assert_eq!(&body[53..57], &2u32.to_le_bytes());
        assert_eq!(body.len(), 57 + 2 * (4 + 32));
    }

    #[test]
    fn test_truncated_body_rejected() {
        let encoded = sample().encode().unwrap();
        let err = SvmExtraArgsV1::decode(&encoded[..encoded.len() - 1]).unwrap_err();
        assert!(matches!(err, ExtraArgsError::Body { variant: "SVMExtraArgsV1", .. }));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut encoded = sample().encode().unwrap();
        encoded.push(0);
        assert!(SvmExtraArgsV1::decode(&encoded).is_err());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            compute_units in any::<u64>(),
            bitmap in any::<u64>(),
            ooo in any::<bool>(),
            receiver in prop::collection::vec(any::<u8>(), 0..40),
            accounts in prop::collection::vec(prop::collection::vec(any::<u8>(), 32), 0..6),
        ) {
            let args = SvmExtraArgsV1 {
                compute_units,
                account_is_writable_bitmap: bitmap,
                allow_out_of_order_execution: ooo,
                token_receiver: Bytes::from(receiver),
                accounts: accounts.into_iter().map(Bytes::from).collect(),
            };
            let decoded = SvmExtraArgsV1::decode(&args.encode().unwrap()).unwrap();
            prop_assert_eq!(decoded, args);
        }
    }
}
