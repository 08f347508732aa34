use core::time::Duration;

use crate::*;

/// The game state container: one engine, its configuration, and the scheduler that
/// drives the delayed resolution of a selected pair.
///
/// Renderers only read from it and forward intents ([`MemoryGame::reveal`],
/// [`MemoryGame::new_game`]). When a reveal completes a pair, a resolution is
/// scheduled for `resolve_delay` later; the scheduler calls back into
/// [`MemoryGame::fire`] with the ticket it was given.
#[derive(Debug)]
pub struct MemoryGame<S> {
    config: GameConfig,
    engine: PlayEngine,
    scheduler: S,
    generation: u32,
    sequence: u32,
    pending: Option<ResolveTicket>,
}

impl<S: ResolveScheduler> MemoryGame<S> {
    pub fn new(config: GameConfig, seed: u64, scheduler: S) -> Self {
        let deck = RandomDeckGenerator::new(seed).generate(&config);
        Self::with_deck(config, deck, scheduler)
    }

    pub fn with_deck(config: GameConfig, deck: Deck, scheduler: S) -> Self {
        Self::restore(config, PlayEngine::new(deck), scheduler)
    }

    /// Resumes a previously saved engine. A pair that was waiting for resolution gets a
    /// fresh resolution scheduled.
    pub fn restore(mut config: GameConfig, engine: PlayEngine, scheduler: S) -> Self {
        config.pair_count = engine.pair_count();
        let mut game = Self {
            config,
            engine,
            scheduler,
            generation: 0,
            sequence: 0,
            pending: None,
        };
        if game.engine.state().is_locked() {
            game.schedule_resolution();
        }
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending_ticket(&self) -> Option<ResolveTicket> {
        self.pending
    }

    pub fn is_game_complete(&self) -> bool {
        self.engine.is_game_complete()
    }

    pub fn observe(&self) -> Observation {
        Observation::from_engine(&self.engine)
    }

    /// Takes effect on the next deal.
    pub fn set_symbol_pick(&mut self, symbol_pick: SymbolPick) {
        self.config.symbol_pick = symbol_pick;
    }

    /// Deals a fresh deck of `pair_count` pairs, dropping any pending resolution.
    pub fn new_game(&mut self, pair_count: PairCount, seed: u64) {
        self.config.pair_count = pair_count;
        let deck = RandomDeckGenerator::new(seed).generate(&self.config);
        self.new_game_with_deck(deck);
    }

    pub fn new_game_with_deck(&mut self, deck: Deck) {
        self.cancel_pending();
        self.generation = self.generation.wrapping_add(1);
        self.sequence = 0;
        self.config.pair_count = deck.pair_count();
        self.engine = PlayEngine::new(deck);
        log::debug!(
            "new game: {} pairs, generation {}",
            self.config.pair_count,
            self.generation
        );
    }

    pub fn reveal(&mut self, id: CardId) -> RevealOutcome {
        let outcome = self.engine.reveal(id);
        if outcome == RevealOutcome::PairSelected {
            self.schedule_resolution();
        }
        outcome
    }

    /// Scheduler callback. Only the currently pending ticket resolves anything.
    pub fn fire(&mut self, ticket: ResolveTicket) -> ResolveOutcome {
        if self.pending != Some(ticket) {
            log::debug!("ignoring stale resolution {:?}", ticket);
            return ResolveOutcome::NoChange;
        }
        self.pending = None;
        self.engine.resolve()
    }

    /// Resolves the selected pair right away, without waiting for the scheduler.
    pub fn resolve(&mut self) -> ResolveOutcome {
        self.cancel_pending();
        self.engine.resolve()
    }

    fn schedule_resolution(&mut self) {
        self.sequence = self.sequence.wrapping_add(1);
        let ticket = ResolveTicket::new(self.generation, self.sequence);
        self.pending = Some(ticket);
        self.scheduler.schedule(self.config.resolve_delay, ticket);
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            log::debug!("cancelling pending resolution {:?}", ticket);
            self.scheduler.cancel(ticket);
        }
    }
}

impl MemoryGame<ManualScheduler> {
    /// Moves the virtual clock and fires whatever came due.
    pub fn advance(&mut self, elapsed: Duration) -> ResolveOutcome {
        self.scheduler
            .advance(elapsed)
            .into_iter()
            .map(|ticket| self.fire(ticket))
            .fold(ResolveOutcome::NoChange, core::ops::BitOr::bitor)
    }
}
