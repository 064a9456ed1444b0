use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

/// Prefix of every message leaf preimage.
pub const LEAF_DOMAIN_SEPARATOR: B256 = B256::ZERO;
/// Prefix of every internal node preimage, keeping leaves and nodes in separate domains.
pub const INTERNAL_DOMAIN_SEPARATOR: B256 = B256::with_last_byte(1);
/// Sentinel appended to odd layers.
pub const ZERO_HASH: B256 = B256::ZERO;

/// Internal-node hashing primitive of a tree.
pub trait Hasher {
    fn hash_internal(&self, a: B256, b: B256) -> B256;

    fn zero_hash(&self) -> B256;
}

/// The on-chain verifier's keccak256 node hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Ctx;

impl Hasher for Keccak256Ctx {
    /// `keccak256(INTERNAL_DOMAIN_SEPARATOR || min(a, b) || max(a, b))`
    ///
    /// Operands are ordered byte-wise so a proof hash combines the same way whether it was the
    /// left or the right sibling; proofs do not carry positions.
    fn hash_internal(&self, a: B256, b: B256) -> B256 {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak256::new();
        hasher.update(INTERNAL_DOMAIN_SEPARATOR);
        hasher.update(left);
        hasher.update(right);
        B256::from_slice(&hasher.finalize())
    }

    fn zero_hash(&self) -> B256 {
        ZERO_HASH
    }
}

/// Hashes two nodes with [`Keccak256Ctx`].
pub fn hash_internal(a: B256, b: B256) -> B256 {
    Keccak256Ctx.hash_internal(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_internal_vector() {
        let a = B256::repeat_byte(0x11);
        let b = B256::repeat_byte(0x22);
        let expected: B256 = "0x451893d6b11ac7b39107d02ba9becb63dc460cc26bc67ec9860e26610666dd24"
            .parse()
            .unwrap();
        assert_eq!(hash_internal(a, b), expected);
        assert_eq!(hash_internal(b, a), expected);
    }

    #[test]
    fn test_domain_separators() {
        assert_eq!(
            hex::encode(INTERNAL_DOMAIN_SEPARATOR),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(LEAF_DOMAIN_SEPARATOR, B256::ZERO);
        // an internal node never equals the plain keccak of its children
        let a = B256::repeat_byte(1);
        let plain = alloy_primitives::keccak256([a.as_slice(), a.as_slice()].concat());
        assert_ne!(hash_internal(a, a), plain);
    }
}
