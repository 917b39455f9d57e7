use super::{lanes, Block};
use crate::config::RuntimeConfig;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Fast statistical PRNG over [`Block`]s.
///
/// Not cryptographically secure: wire labels drawn from here still need a
/// keyed construction on top before they are used in a garbling protocol.
/// Each instance owns its state, so independent instances (one per thread,
/// each seeded separately) never contend.
#[derive(Clone, Debug, Default)]
pub struct BlockGenerator {
    state: Block,
}

impl BlockGenerator {
    /// Generator in the unseeded, all-zero state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(value: u32) -> Self {
        let mut generator = Self::new();
        generator.seed(value);
        generator
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Replaces the state with four lane seeds derived from `value`.
    pub fn seed(&mut self, value: u32) {
        self.state = Block::from_lanes(lanes::seed_lanes(value));
        debug!(seed = value, state = %self.state, "seeded block generator");
    }

    pub fn state(&self) -> Block {
        self.state
    }

    pub fn advance(&mut self) -> Block {
        self.state = Block::from_lanes(lanes::step(self.state.lanes()));
        trace!(state = %self.state, "advanced block generator");
        self.state
    }

    pub fn fill(&mut self, out: &mut [Block]) {
        for slot in out {
            *slot = self.advance();
        }
    }
}

impl Iterator for BlockGenerator {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        Some(self.advance())
    }
}

/// A generator confined behind a lock, for callers that cannot give each
/// thread its own instance.
#[derive(Clone, Debug, Default)]
pub struct SharedBlockGenerator {
    inner: Arc<Mutex<BlockGenerator>>,
}

impl SharedBlockGenerator {
    pub fn new(generator: BlockGenerator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(generator)),
        }
    }

    pub fn seed(&self, value: u32) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .seed(value);
    }

    pub fn advance(&self) -> Block {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advance()
    }
}
