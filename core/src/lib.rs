#![no_std]

extern crate alloc;

use core::ops::BitOr;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use manager::*;
pub use observation::*;
pub use schedule::*;
pub use symbol::*;
pub use types::*;

mod card;
mod deck;
mod engine;
mod error;
mod generator;
mod manager;
mod observation;
mod schedule;
mod symbol;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pair_count: PairCount,
    pub symbol_pick: SymbolPick,
    /// How long a selected pair stays face up before it is resolved.
    pub resolve_delay: Duration,
}

impl GameConfig {
    pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_secs(1);

    pub const fn new(pair_count: PairCount) -> Self {
        Self {
            pair_count,
            symbol_pick: SymbolPick::Random,
            resolve_delay: Self::DEFAULT_RESOLVE_DELAY,
        }
    }

    pub const fn with_symbol_pick(self, symbol_pick: SymbolPick) -> Self {
        Self {
            symbol_pick,
            ..self
        }
    }

    pub const fn with_resolve_delay(self, resolve_delay: Duration) -> Self {
        Self {
            resolve_delay,
            ..self
        }
    }

    pub const fn total_cards(&self) -> usize {
        self.pair_count.total_cards()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(PairCount::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    PairSelected,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed => true,
            Self::PairSelected => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    NoChange,
    Matched,
    Mismatched,
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        use ResolveOutcome::*;
        match self {
            NoChange => false,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched | Self::Won)
    }
}

impl BitOr for ResolveOutcome {
    type Output = ResolveOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ResolveOutcome::*;
        match (self, rhs) {
            (Won, _) => Won,
            (_, Won) => Won,
            (Matched, _) => Matched,
            (_, Matched) => Matched,
            (Mismatched, _) => Mismatched,
            (_, Mismatched) => Mismatched,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_deals_three_pairs_with_one_second_delay() {
        let config = GameConfig::default();

        assert_eq!(config.pair_count, PairCount::Three);
        assert_eq!(config.total_cards(), 6);
        assert_eq!(config.resolve_delay, Duration::from_secs(1));
    }

    #[test]
    fn resolve_outcomes_combine_by_precedence() {
        use ResolveOutcome::*;

        assert_eq!(NoChange | Mismatched, Mismatched);
        assert_eq!(Mismatched | Matched, Matched);
        assert_eq!(Matched | Won, Won);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(Won.is_match());
        assert!(!Mismatched.is_match());
    }
}
