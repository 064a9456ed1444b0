//! Checks CCIP messages against the Merkle roots committed on chain and builds the proofs needed
//! to execute them manually.

pub mod config;
pub mod error;
pub mod manual_exec;
pub mod registry;
pub mod verify;

pub use config::{Config, LaneConfig};
pub use error::{Result, VerifyError};
pub use manual_exec::{ManualExecProof, manual_exec_proof};
pub use registry::HasherRegistry;
pub use verify::{leaf_hashes, verify_messages};
