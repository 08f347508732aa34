use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{GameError, PairCount, Result};

const POOL: [(&str, &str); 13] = [
    ("🍎", "apple"),
    ("🍊", "tangerine"),
    ("🍇", "grapes"),
    ("🍌", "banana"),
    ("🍉", "watermelon"),
    ("🥑", "avocado"),
    ("🍒", "cherries"),
    ("🥭", "mango"),
    ("🍍", "pineapple"),
    ("🍓", "strawberry"),
    ("🦀", "crab"),
    ("🤘", "horns"),
    ("🦾", "arm"),
];

/// Number of distinct symbols a deck can draw from.
pub const SYMBOL_POOL_SIZE: usize = POOL.len();

const _: () = assert!(SYMBOL_POOL_SIZE >= PairCount::MAX.get());

/// A face value from the fixed symbol pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Symbol(u8);

impl Symbol {
    pub const fn new(index: u8) -> Result<Self> {
        if (index as usize) < SYMBOL_POOL_SIZE {
            Ok(Self(index))
        } else {
            Err(GameError::UnknownSymbol(index))
        }
    }

    /// Caller guarantees `index < SYMBOL_POOL_SIZE`.
    pub(crate) const fn from_pool_index(index: usize) -> Self {
        debug_assert!(index < SYMBOL_POOL_SIZE);
        Self(index as u8)
    }

    pub fn pool() -> impl Iterator<Item = Symbol> {
        (0..SYMBOL_POOL_SIZE).map(Self::from_pool_index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn glyph(self) -> &'static str {
        POOL[self.0 as usize].0
    }

    pub const fn name(self) -> &'static str {
        POOL[self.0 as usize].1
    }
}

impl TryFrom<u8> for Symbol {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
