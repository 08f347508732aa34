use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Where the current pair-selection cycle is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    OneSelected,
    Pending,
}

impl EngineState {
    /// No reveal is accepted while a pair waits for resolution.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

pub type Selection = SmallVec<[CardId; 2]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    deck: Deck,
    selection: Selection,
}

impl PlayEngine {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            selection: SmallVec::new(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn state(&self) -> EngineState {
        match self.selection.len() {
            0 => EngineState::Idle,
            1 => EngineState::OneSelected,
            _ => EngineState::Pending,
        }
    }

    pub fn pair_count(&self) -> PairCount {
        self.deck.pair_count()
    }

    pub fn matched_pairs(&self) -> usize {
        self.deck.iter().filter(|card| card.is_resolved()).count() / 2
    }

    pub fn is_game_complete(&self) -> bool {
        self.deck.iter().all(Card::is_resolved)
    }

    pub fn can_reveal(&self, id: CardId) -> bool {
        !self.state().is_locked() && self.deck.get(id).is_some_and(Card::can_reveal)
    }

    pub fn reveal(&mut self, id: CardId) -> RevealOutcome {
        let Ok(id) = self.deck.validate_id(id) else {
            log::debug!("ignoring reveal of unknown card {}", id);
            return RevealOutcome::NoChange;
        };

        if self.state().is_locked() {
            log::debug!("ignoring reveal of card {} while a pair is pending", id);
            return RevealOutcome::NoChange;
        }

        let card = &mut self.deck[id];
        if !card.can_reveal() {
            log::debug!("ignoring reveal of card {} ({:?})", id, card.face());
            return RevealOutcome::NoChange;
        }

        card.flip_up();
        self.selection.push(id);

        if self.state().is_locked() {
            RevealOutcome::PairSelected
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn resolve(&mut self) -> ResolveOutcome {
        let &[first, second] = self.selection.as_slice() else {
            return ResolveOutcome::NoChange;
        };
        self.selection.clear();

        if self.deck[first].symbol() == self.deck[second].symbol() {
            self.deck[first].mark_resolved();
            self.deck[second].mark_resolved();
            if self.is_game_complete() {
                ResolveOutcome::Won
            } else {
                ResolveOutcome::Matched
            }
        } else {
            self.deck[first].flip_down();
            self.deck[second].flip_down();
            ResolveOutcome::Mismatched
        }
    }

    /// Re-checks invariants of an engine that came from outside, e.g. storage.
    pub fn validate(&self) -> Result<()> {
        self.deck.validate()?;

        if self.selection.len() > 2 {
            return Err(GameError::InvalidSelection);
        }
        for (index, &id) in self.selection.iter().enumerate() {
            let card = self.deck.get(id).ok_or(GameError::InvalidCardId(id))?;
            if !card.is_revealed() || card.is_resolved() || self.selection[..index].contains(&id) {
                return Err(GameError::InvalidSelection);
            }
        }

        let face_up_unmatched = self
            .deck
            .iter()
            .filter(|card| card.is_revealed() && !card.is_resolved())
            .count();
        if face_up_unmatched != self.selection.len() {
            return Err(GameError::InvalidSelection);
        }

        Ok(())
    }
}
