use ccip_types::{ChainFamily, ExtraArgsError, ProtocolVersion};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HasherError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HasherError {
    #[error("protocol version {version} is not supported for {family} destinations")]
    UnsupportedProtocolVersion { family: ChainFamily, version: ProtocolVersion },

    #[error("invalid extra args: {0}")]
    InvalidExtraArgs(#[from] ExtraArgsError),

    #[error("{family} leaf hash needs {field}, which {variant} extra args do not carry")]
    MissingField {
        family: ChainFamily,
        field: &'static str,
        variant: &'static str,
    },

    #[error("invalid {field}: {len} bytes do not fit a {width} byte address")]
    InvalidAddress {
        field: &'static str,
        len: usize,
        width: usize,
    },
}
