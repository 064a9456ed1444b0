use std::collections::HashMap;

use alloy_primitives::{B256, Bytes};
use ccip_hasher::LeafHasher;
use ccip_merkle::{MerkleError, Proof};
use ccip_types::{Lane, Message};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, VerifyError};
use crate::verify;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LaneKey {
    source_chain_selector: u64,
    dest_chain_selector: u64,
    on_ramp: Bytes,
}

impl From<&Lane> for LaneKey {
    fn from(lane: &Lane) -> Self {
        Self {
            source_chain_selector: lane.source_chain_selector,
            dest_chain_selector: lane.dest_chain_selector,
            on_ramp: lane.on_ramp.clone(),
        }
    }
}

/// Leaf hashers keyed by lane, built once and shared by every verification.
#[derive(Debug, Clone, Default)]
pub struct HasherRegistry {
    hashers: HashMap<LaneKey, LeafHasher>,
}

impl HasherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hasher for every configured lane. Fails on the first lane whose destination
    /// family and version have no leaf hasher.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        for lane in &config.lanes {
            registry.insert(LeafHasher::new(lane.dest_family, lane.lane())?);
        }
        debug!(lanes = registry.len(), "built hasher registry");
        Ok(registry)
    }

    /// Registers `hasher`, returning the one it replaces on the same lane.
    pub fn insert(&mut self, hasher: LeafHasher) -> Option<LeafHasher> {
        self.hashers.insert(LaneKey::from(hasher.lane()), hasher)
    }

    pub fn get(&self, source_chain_selector: u64, dest_chain_selector: u64, on_ramp: &[u8]) -> Option<&LeafHasher> {
        self.hashers.get(&LaneKey {
            source_chain_selector,
            dest_chain_selector,
            on_ramp: Bytes::copy_from_slice(on_ramp),
        })
    }

    /// The hasher for `message` as accepted by `on_ramp`.
    pub fn hasher_for(&self, message: &Message, on_ramp: &[u8]) -> Result<&LeafHasher> {
        self.get(message.source_chain_selector, message.dest_chain_selector, on_ramp)
            .ok_or_else(|| VerifyError::UnknownLane {
                source_chain_selector: message.source_chain_selector,
                dest_chain_selector: message.dest_chain_selector,
                on_ramp: Bytes::copy_from_slice(on_ramp),
            })
    }

    /// Verifies `messages` from one commit of `on_ramp` against `expected_root`, using the lane
    /// of the first message.
    pub fn verify_messages(
        &self,
        on_ramp: &[u8],
        messages: &[Message],
        proof: &Proof,
        expected_root: B256,
    ) -> Result<B256> {
        let first = messages.first().ok_or(MerkleError::EmptyLeaves)?;
        let hasher = self.hasher_for(first, on_ramp)?;
        verify::verify_messages(hasher, messages, proof, expected_root)
    }

    pub fn len(&self) -> usize {
        self.hashers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashers.is_empty()
    }
}
