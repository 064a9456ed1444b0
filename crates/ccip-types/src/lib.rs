//! Value types shared by the CCIP verification crates.
//!
//! Messages and lane metadata are plain data built once from chain logs or API records. The
//! [`extra_args`] module holds the tagged binary codecs for the per-family execution arguments
//! embedded in every message.

pub mod extra_args;
pub mod lane;
pub mod message;

pub use extra_args::{
    EvmExtraArgsV1, EvmExtraArgsV2, ExtraArgs, ExtraArgsCodec, ExtraArgsError, SuiExtraArgsV1, SvmExtraArgsV1,
};
pub use lane::{ChainFamily, Lane, ParseLaneError, ProtocolVersion};
pub use message::{Message, TokenAmount};
