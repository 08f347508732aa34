use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered cards of one game, every symbol present exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pair_count: PairCount,
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck in the given order, checking the pairing invariant and the deck size.
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        validate_pairs(symbols.iter().copied())?;
        let pair_count = PairCount::try_from(symbols.len() / 2)?;
        Ok(Self::from_parts(pair_count, symbols))
    }

    pub(crate) fn from_parts(pair_count: PairCount, symbols: &[Symbol]) -> Self {
        debug_assert_eq!(symbols.len(), pair_count.total_cards());
        let cards = symbols
            .iter()
            .enumerate()
            .map(|(id, &symbol)| Card::new(id as CardId, symbol))
            .collect();
        Self { pair_count, cards }
    }

    pub fn pair_count(&self) -> PairCount {
        self.pair_count
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cards.iter().map(Card::symbol)
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(usize::from(id))
    }

    pub fn validate_id(&self, id: CardId) -> Result<CardId> {
        if usize::from(id) < self.cards.len() {
            Ok(id)
        } else {
            Err(GameError::InvalidCardId(id))
        }
    }

    /// Re-checks invariants of a deck that came from outside, e.g. storage.
    pub fn validate(&self) -> Result<()> {
        validate_pairs(self.symbols())?;
        if self.cards.len() != self.pair_count.total_cards() {
            return Err(GameError::UnsupportedPairCount(self.cards.len() / 2));
        }
        // both cards of a pair are resolved together
        let mut resolved = [None; SYMBOL_POOL_SIZE];
        for (index, card) in self.cards.iter().enumerate() {
            let partner = &mut resolved[usize::from(card.symbol().index())];
            match *partner {
                Some(other) if other != card.is_resolved() => {
                    return Err(GameError::HalfMatchedPair(card.symbol()));
                }
                _ => *partner = Some(card.is_resolved()),
            }
            if usize::from(card.id()) != index {
                return Err(GameError::InvalidCardId(card.id()));
            }
            if card.is_resolved() && !card.is_revealed() {
                return Err(GameError::InvalidCardId(card.id()));
            }
        }
        Ok(())
    }
}

impl Index<CardId> for Deck {
    type Output = Card;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.cards[usize::from(id)]
    }
}

impl IndexMut<CardId> for Deck {
    fn index_mut(&mut self, id: CardId) -> &mut Self::Output {
        &mut self.cards[usize::from(id)]
    }
}

fn validate_pairs(symbols: impl Iterator<Item = Symbol>) -> Result<()> {
    let mut counts = [0usize; SYMBOL_POOL_SIZE];
    let mut order = Vec::new();
    for symbol in symbols {
        let count = &mut counts[usize::from(symbol.index())];
        if *count == 0 {
            order.push(symbol);
        }
        *count += 1;
    }

    match order
        .into_iter()
        .find(|symbol| counts[usize::from(symbol.index())] != 2)
    {
        Some(symbol) => Err(GameError::UnpairedSymbol(symbol)),
        None => Ok(()),
    }
}
