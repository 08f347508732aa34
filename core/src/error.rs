use thiserror::Error;

use crate::{CardId, Symbol};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unsupported pair count: {0}")]
    UnsupportedPairCount(usize),
    #[error("Invalid card id: {0}")]
    InvalidCardId(CardId),
    #[error("Unknown symbol index: {0}")]
    UnknownSymbol(u8),
    #[error("Symbol {0} does not appear exactly twice")]
    UnpairedSymbol(Symbol),
    #[error("Only one card of symbol {0} is matched")]
    HalfMatchedPair(Symbol),
    #[error("Selection does not match the revealed cards")]
    InvalidSelection,
}

pub type Result<T> = core::result::Result<T, GameError>;
