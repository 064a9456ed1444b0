use alloy_primitives::U256;
use ccip_types::{ChainFamily, ExtraArgs, Message};

use crate::error::{HasherError, Result};

/// Gas limit for destinations that take EVM-shaped extra args.
///
/// The message's own `gas_limit` wins; otherwise it comes from an `EVMExtraArgsV1` or
/// `GenericExtraArgsV2` blob. Any other variant is rejected, never defaulted.
pub(crate) fn evm_gas_limit(family: ChainFamily, message: &Message) -> Result<U256> {
    if let Some(gas_limit) = message.gas_limit {
        return Ok(gas_limit);
    }
    match message.decode_extra_args()? {
        ExtraArgs::EvmV1(args) => Ok(args.gas_limit),
        ExtraArgs::EvmV2(args) => Ok(args.gas_limit),
        other => Err(HasherError::MissingField {
            family,
            field: "gasLimit",
            variant: other.name(),
        }),
    }
}
