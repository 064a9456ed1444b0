//! Tagged codecs for the per-family "extra args" blob.
//!
//! Wire shape is `tag (4 bytes) || body`. The tag identifies the family and version and is fixed
//! by the deployed protocol; each body has its own layout:
//!
//! | variant | tag | body |
//! |---|---|---|
//! | [`EvmExtraArgsV1`] | `0x97a657c9` | ABI `(uint256)` |
//! | [`EvmExtraArgsV2`] | `0x181dcf10` | ABI `(uint256, bool)` |
//! | [`SvmExtraArgsV1`] | `0x1f3b3aba` | Borsh struct |
//! | [`SuiExtraArgsV1`] | `0x21ea4ca9` | BCS struct |

mod evm;
mod sui;
mod svm;

use alloy_primitives::{FixedBytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use evm::{EVM_EXTRA_ARGS_V1_TAG, EVM_EXTRA_ARGS_V2_TAG, EvmExtraArgsV1, EvmExtraArgsV2};
pub use sui::{SUI_EXTRA_ARGS_V1_TAG, SuiExtraArgsV1};
pub use svm::{SVM_EXTRA_ARGS_V1_TAG, SvmExtraArgsV1};

pub const TAG_LENGTH: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtraArgsError {
    #[error("extra args too short: {len} bytes, a 4 byte tag is required")]
    Truncated { len: usize },

    #[error("unknown extra args tag {tag}")]
    UnknownTag { tag: FixedBytes<4> },

    #[error("extra args tag mismatch: expected {expected}, found {found}")]
    TagMismatch {
        expected: FixedBytes<4>,
        found: FixedBytes<4>,
    },

    #[error("cannot decode {variant} body: {reason}")]
    Body { variant: &'static str, reason: String },

    #[error("cannot encode {variant} body: {reason}")]
    Encode { variant: &'static str, reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A single tagged extra-args layout.
pub trait ExtraArgsCodec: Sized {
    /// The 4-byte family+version tag that prefixes the encoded body.
    const TAG: [u8; TAG_LENGTH];
    /// Protocol name of the layout, used in error reports.
    const NAME: &'static str;

    fn encode_body(&self) -> Result<Vec<u8>, ExtraArgsError>;

    fn decode_body(body: &[u8]) -> Result<Self, ExtraArgsError>;

    fn encode(&self) -> Result<Vec<u8>, ExtraArgsError> {
        let body = self.encode_body()?;
        let mut encoded = Vec::with_capacity(TAG_LENGTH + body.len());
        encoded.extend_from_slice(&Self::TAG);
        encoded.extend_from_slice(&body);
        Ok(encoded)
    }

    /// Decodes `tag || body`, rejecting any tag other than [`Self::TAG`].
    fn decode(bytes: &[u8]) -> Result<Self, ExtraArgsError> {
        let (tag, body) = split_tag(bytes)?;
        if tag != Self::TAG {
            return Err(ExtraArgsError::TagMismatch {
                expected: FixedBytes::from(Self::TAG),
                found: FixedBytes::from(tag),
            });
        }
        Self::decode_body(body)
    }
}

/// Splits an encoded blob into its tag and body.
pub fn split_tag(bytes: &[u8]) -> Result<([u8; TAG_LENGTH], &[u8]), ExtraArgsError> {
    if bytes.len() < TAG_LENGTH {
        return Err(ExtraArgsError::Truncated { len: bytes.len() });
    }
    let (tag, body) = bytes.split_at(TAG_LENGTH);
    let mut raw = [0u8; TAG_LENGTH];
    raw.copy_from_slice(tag);
    Ok((raw, body))
}

/// Every known extra-args layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ExtraArgs {
    EvmV1(EvmExtraArgsV1),
    EvmV2(EvmExtraArgsV2),
    SvmV1(SvmExtraArgsV1),
    SuiV1(SuiExtraArgsV1),
}

impl ExtraArgs {
    /// Decodes a blob by dispatching on its tag. Unknown tags are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, ExtraArgsError> {
        let (tag, body) = split_tag(bytes)?;
        match tag {
            EVM_EXTRA_ARGS_V1_TAG => EvmExtraArgsV1::decode_body(body).map(ExtraArgs::EvmV1),
            EVM_EXTRA_ARGS_V2_TAG => EvmExtraArgsV2::decode_body(body).map(ExtraArgs::EvmV2),
            SVM_EXTRA_ARGS_V1_TAG => SvmExtraArgsV1::decode_body(body).map(ExtraArgs::SvmV1),
            SUI_EXTRA_ARGS_V1_TAG => SuiExtraArgsV1::decode_body(body).map(ExtraArgs::SuiV1),
            unknown => Err(ExtraArgsError::UnknownTag {
                tag: FixedBytes::from(unknown),
            }),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, ExtraArgsError> {
        match self {
            ExtraArgs::EvmV1(args) => args.encode(),
            ExtraArgs::EvmV2(args) => args.encode(),
            ExtraArgs::SvmV1(args) => args.encode(),
            ExtraArgs::SuiV1(args) => args.encode(),
        }
    }

    pub fn tag(&self) -> [u8; TAG_LENGTH] {
        match self {
            ExtraArgs::EvmV1(_) => EvmExtraArgsV1::TAG,
            ExtraArgs::EvmV2(_) => EvmExtraArgsV2::TAG,
            ExtraArgs::SvmV1(_) => SvmExtraArgsV1::TAG,
            ExtraArgs::SuiV1(_) => SuiExtraArgsV1::TAG,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExtraArgs::EvmV1(_) => EvmExtraArgsV1::NAME,
            ExtraArgs::EvmV2(_) => EvmExtraArgsV2::NAME,
            ExtraArgs::SvmV1(_) => SvmExtraArgsV1::NAME,
            ExtraArgs::SuiV1(_) => SuiExtraArgsV1::NAME,
        }
    }

    /// Gas limit, or compute units for SVM, widened to 256 bits.
    pub fn gas_limit(&self) -> Option<U256> {
        match self {
            ExtraArgs::EvmV1(args) => Some(args.gas_limit),
            ExtraArgs::EvmV2(args) => Some(args.gas_limit),
            ExtraArgs::SvmV1(args) => Some(U256::from(args.compute_units)),
            ExtraArgs::SuiV1(args) => Some(U256::from(args.gas_limit)),
        }
    }

    /// `None` for layouts that predate the out-of-order flag.
    pub fn allow_out_of_order_execution(&self) -> Option<bool> {
        match self {
            ExtraArgs::EvmV1(_) => None,
            ExtraArgs::EvmV2(args) => Some(args.allow_out_of_order_execution),
            ExtraArgs::SvmV1(args) => Some(args.allow_out_of_order_execution),
            ExtraArgs::SuiV1(args) => Some(args.allow_out_of_order_execution),
        }
    }
}

impl From<EvmExtraArgsV1> for ExtraArgs {
    fn from(args: EvmExtraArgsV1) -> Self {
        ExtraArgs::EvmV1(args)
    }
}

impl From<EvmExtraArgsV2> for ExtraArgs {
    fn from(args: EvmExtraArgsV2) -> Self {
        ExtraArgs::EvmV2(args)
    }
}

impl From<SvmExtraArgsV1> for ExtraArgs {
    fn from(args: SvmExtraArgsV1) -> Self {
        ExtraArgs::SvmV1(args)
    }
}

impl From<SuiExtraArgsV1> for ExtraArgs {
    fn from(args: SuiExtraArgsV1) -> Self {
        ExtraArgs::SuiV1(args)
    }
}
