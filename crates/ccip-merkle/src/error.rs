use thiserror::Error;

pub type Result<T> = std::result::Result<T, MerkleError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("leaves cannot be empty")]
    EmptyLeaves,

    #[error("too many leaves: {count} exceeds {max}")]
    TooManyLeaves { count: usize, max: usize },

    #[error("no leaf indices to prove")]
    EmptyIndices,

    #[error("leaf index {index} out of range for a tree of {leaves} leaves")]
    IndexOutOfRange { index: usize, leaves: usize },

    #[error("malformed proof: {false_flags} false source flags but {hashes} proof hashes")]
    MalformedProof { false_flags: usize, hashes: usize },

    #[error("too many hashing steps: {total} exceeds {max}")]
    TooManyHashes { total: usize, max: usize },

    #[error("invalid proof: {0}")]
    InvalidProof(String),

    #[error("cannot pack {count} source flags into a 256-bit bitmap")]
    TooManyFlags { count: usize },
}
