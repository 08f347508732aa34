use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned, read-only view of a game for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub faces: Vec<CardFace>,
    pub state: EngineState,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub complete: bool,
}

impl Observation {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        Self {
            faces: engine.cards().iter().map(Card::face).collect(),
            state: engine.state(),
            matched_pairs: engine.matched_pairs(),
            total_pairs: engine.pair_count().get(),
            complete: engine.is_game_complete(),
        }
    }

    pub fn pairs_left(&self) -> usize {
        self.total_pairs - self.matched_pairs
    }
}
