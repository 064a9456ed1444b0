//! Word-aligned packing used by the Move off-ramps when they rebuild a leaf hash.
//!
//! Every integer is a 32-byte big-endian word, addresses are left-padded to one word and variable
//! byte strings are written as `word(len) || data || zero padding to a word boundary`. The output
//! matches Solidity's `abi.encode` for static fields, but dynamic fields are inlined instead of
//! referenced through offsets.

use alloy_primitives::{B256, U256, keccak256};
use ccip_types::{Lane, TokenAmount};

use crate::error::{HasherError, Result};

const WORD: usize = 32;

#[derive(Debug, Default)]
pub(crate) struct PackedEncoder {
    buf: Vec<u8>,
}

impl PackedEncoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fixed(&mut self, word: B256) {
        self.buf.extend_from_slice(word.as_slice());
    }

    pub(crate) fn uint(&mut self, value: U256) {
        self.buf.extend_from_slice(&value.to_be_bytes::<WORD>());
    }

    pub(crate) fn u64(&mut self, value: u64) {
        self.uint(U256::from(value));
    }

    pub(crate) fn address(&mut self, field: &'static str, raw: &[u8]) -> Result<()> {
        let word = left_pad(field, raw)?;
        self.fixed(word);
        Ok(())
    }

    pub(crate) fn bytes(&mut self, data: &[u8]) {
        self.u64(data.len() as u64);
        self.buf.extend_from_slice(data);
        let rem = data.len() % WORD;
        if rem != 0 {
            self.buf.resize(self.buf.len() + WORD - rem, 0);
        }
    }

    pub(crate) fn keccak(&self) -> B256 {
        keccak256(&self.buf)
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Left-pads a native address of at most 32 bytes to a full word.
pub(crate) fn left_pad(field: &'static str, raw: &[u8]) -> Result<B256> {
    if raw.len() > WORD {
        return Err(HasherError::InvalidAddress {
            field,
            len: raw.len(),
            width: WORD,
        });
    }
    Ok(B256::left_padding_from(raw))
}

/// `keccak256(keccak256(tag) || word(source) || word(dest) || keccak256(onRamp))`
pub(crate) fn metadata_hash(tag: &str, lane: &Lane) -> B256 {
    let mut enc = PackedEncoder::new();
    enc.fixed(keccak256(tag.as_bytes()));
    enc.u64(lane.source_chain_selector);
    enc.u64(lane.dest_chain_selector);
    enc.fixed(keccak256(&lane.on_ramp));
    enc.keccak()
}

/// Hash of the token transfers as the Move off-ramps pack them.
pub(crate) fn token_hash(tokens: &[TokenAmount]) -> Result<B256> {
    let mut enc = PackedEncoder::new();
    enc.u64(tokens.len() as u64);
    for token in tokens {
        enc.bytes(&token.source_pool_address);
        enc.address("destTokenAddress", &token.dest_token_address)?;
        enc.u64(u64::from(token.dest_gas_amount));
        enc.bytes(&token.extra_data);
        enc.uint(token.amount);
    }
    Ok(enc.keccak())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_are_length_prefixed_and_padded() {
        let mut enc = PackedEncoder::new();
        enc.bytes(&[0xaa; 33]);
        let out = enc.as_bytes();
        assert_eq!(out.len(), 32 + 64);
        assert_eq!(out[31], 33);
        assert_eq!(&out[32..65], &[0xaa; 33]);
        assert!(out[65..].iter().all(|b| *b == 0));

        let mut empty = PackedEncoder::new();
        empty.bytes(&[]);
        assert_eq!(empty.as_bytes(), &[0u8; 32]);
    }

    #[test]
    fn test_word_aligned_input_is_not_padded() {
        let mut enc = PackedEncoder::new();
        enc.bytes(&[1; 32]);
        assert_eq!(enc.as_bytes().len(), 64);
    }

    #[test]
    fn test_address_padding() {
        let mut enc = PackedEncoder::new();
        enc.address("receiver", &[0x12, 0x34]).unwrap();
        assert_eq!(
            hex::encode(enc.as_bytes()),
            "0000000000000000000000000000000000000000000000000000000000001234"
        );
        assert_eq!(
            left_pad("receiver", &[0; 33]).unwrap_err(),
            HasherError::InvalidAddress {
                field: "receiver",
                len: 33,
                width: 32
            }
        );
    }

    #[test]
    fn test_empty_token_list() {
        assert_eq!(token_hash(&[]).unwrap(), keccak256([0u8; 32]));
    }
}
