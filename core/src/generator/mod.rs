use crate::*;
use serde::{Deserialize, Serialize};
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck;
}

/// Which symbols of the pool a deal uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPick {
    /// The first `pair_count` symbols of the pool.
    Leading,
    /// `pair_count` distinct symbols sampled uniformly from the pool.
    Random,
}

impl Default for SymbolPick {
    fn default() -> Self {
        Self::Random
    }
}
