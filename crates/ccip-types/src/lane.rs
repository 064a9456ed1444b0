use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseLaneError {
    #[error("unknown chain family: {0}")]
    UnknownFamily(String),
    #[error("unknown protocol version: {0}")]
    UnknownVersion(String),
}

/// Chain families the protocol connects. Each family has its own address width, extra-args shape
/// and on-chain leaf hashing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Svm,
    Aptos,
    Sui,
}

impl Display for ChainFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ChainFamily::Evm => "evm",
            ChainFamily::Svm => "svm",
            ChainFamily::Aptos => "aptos",
            ChainFamily::Sui => "sui",
        };
        f.write_str(name)
    }
}

impl FromStr for ChainFamily {
    type Err = ParseLaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "evm" => Ok(ChainFamily::Evm),
            "svm" | "solana" => Ok(ChainFamily::Svm),
            "aptos" => Ok(ChainFamily::Aptos),
            "sui" => Ok(ChainFamily::Sui),
            _ => Err(ParseLaneError::UnknownFamily(s.to_string())),
        }
    }
}

/// Deployed on-ramp/off-ramp protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[serde(rename = "1.2.0")]
    V1_2,
    #[serde(rename = "1.5.0")]
    V1_5,
    #[serde(rename = "1.6.0")]
    V1_6,
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let version = match self {
            ProtocolVersion::V1_2 => "1.2.0",
            ProtocolVersion::V1_5 => "1.5.0",
            ProtocolVersion::V1_6 => "1.6.0",
        };
        f.write_str(version)
    }
}

impl FromStr for ProtocolVersion {
    type Err = ParseLaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('v') {
            "1.2" | "1.2.0" => Ok(ProtocolVersion::V1_2),
            "1.5" | "1.5.0" => Ok(ProtocolVersion::V1_5),
            "1.6" | "1.6.0" => Ok(ProtocolVersion::V1_6),
            _ => Err(ParseLaneError::UnknownVersion(s.to_string())),
        }
    }
}

/// Lane metadata mixed into every leaf hash: which chains a message travels between, which
/// on-ramp accepted it and which protocol version committed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub source_chain_selector: u64,
    pub dest_chain_selector: u64,
    /// Raw on-ramp address bytes in the source family's native width.
    pub on_ramp: Bytes,
    pub version: ProtocolVersion,
}

impl Lane {
    pub fn new(source_chain_selector: u64, dest_chain_selector: u64, on_ramp: Bytes, version: ProtocolVersion) -> Self {
        Self {
            source_chain_selector,
            dest_chain_selector,
            on_ramp,
            version,
        }
    }
}

impl Display for Lane {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} -> {} (onRamp {}, v{})",
            self.source_chain_selector,
            self.dest_chain_selector,
            hex::encode(&self.on_ramp),
            self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_parse_and_display() {
        assert_eq!("1.6.0".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1_6);
        assert_eq!("v1.5".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1_5);
        assert_eq!(ProtocolVersion::V1_2.to_string(), "1.2.0");
        assert!("2.0.0".parse::<ProtocolVersion>().is_err());
    }

    #[test]
    fn test_chain_family_parse() {
        assert_eq!("Sui".parse::<ChainFamily>().unwrap(), ChainFamily::Sui);
        assert_eq!("solana".parse::<ChainFamily>().unwrap(), ChainFamily::Svm);
        assert_eq!(
            "ton".parse::<ChainFamily>().unwrap_err(),
            ParseLaneError::UnknownFamily("ton".to_string())
        );
    }

    #[test]
    fn test_lane_serde() {
        let lane = Lane::new(1, 2, Bytes::from(vec![0xab; 20]), ProtocolVersion::V1_6);
        let json = serde_json::to_string(&lane).unwrap();
        assert!(json.contains("\"sourceChainSelector\":1"));
        assert!(json.contains("\"version\":\"1.6.0\""));
        let decoded: Lane = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, lane);
    }
}
