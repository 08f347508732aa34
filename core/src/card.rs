use serde::{Deserialize, Serialize};

use crate::{CardId, Symbol};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    revealed: bool,
    resolved: bool,
}

impl Card {
    pub(crate) const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            resolved: false,
        }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Face-down and not yet matched.
    pub const fn can_reveal(&self) -> bool {
        !self.revealed && !self.resolved
    }

    pub const fn face(&self) -> CardFace {
        match (self.revealed, self.resolved) {
            (_, true) => CardFace::Matched(self.symbol),
            (true, false) => CardFace::FaceUp(self.symbol),
            (false, false) => CardFace::FaceDown,
        }
    }

    pub(crate) fn flip_up(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn flip_down(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}

/// What a renderer may show for a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    FaceDown,
    FaceUp(Symbol),
    Matched(Symbol),
}

impl CardFace {
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Self::FaceDown => None,
            Self::FaceUp(symbol) | Self::Matched(symbol) => Some(symbol),
        }
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::FaceDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Symbol {
        Symbol::new(0).unwrap()
    }

    #[test]
    fn face_follows_flags() {
        let mut card = Card::new(4, apple());
        assert_eq!(card.face(), CardFace::FaceDown);
        assert!(card.can_reveal());

        card.flip_up();
        assert_eq!(card.face(), CardFace::FaceUp(apple()));
        assert!(!card.can_reveal());

        card.mark_resolved();
        assert_eq!(card.face(), CardFace::Matched(apple()));
        assert!(card.is_revealed());
        assert!(!card.can_reveal());
    }
}
