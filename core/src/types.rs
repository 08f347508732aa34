use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Position of a card in its deck, stable for the lifetime of the deck.
pub type CardId = u8;

/// Supported deck sizes, counted in pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PairCount {
    Three,
    Six,
    Twelve,
}

impl PairCount {
    pub const ALL: [Self; 3] = [Self::Three, Self::Six, Self::Twelve];
    pub const MAX: Self = Self::Twelve;

    pub const fn get(self) -> usize {
        use PairCount::*;
        match self {
            Three => 3,
            Six => 6,
            Twelve => 12,
        }
    }

    pub const fn total_cards(self) -> usize {
        self.get() * 2
    }
}

impl Default for PairCount {
    fn default() -> Self {
        Self::Three
    }
}

impl TryFrom<usize> for PairCount {
    type Error = GameError;

    fn try_from(pairs: usize) -> Result<Self> {
        match pairs {
            3 => Ok(Self::Three),
            6 => Ok(Self::Six),
            12 => Ok(Self::Twelve),
            other => Err(GameError::UnsupportedPairCount(other)),
        }
    }
}

impl From<PairCount> for usize {
    fn from(pairs: PairCount) -> Self {
        pairs.get()
    }
}

impl fmt::Display for PairCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
