use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Identity of one scheduled resolution.
///
/// `generation` changes with every deal, `sequence` with every pair selected
/// within a deal, so a ticket that outlives its pair is recognisably stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolveTicket {
    generation: u32,
    sequence: u32,
}

impl ResolveTicket {
    pub(crate) const fn new(generation: u32, sequence: u32) -> Self {
        Self {
            generation,
            sequence,
        }
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }

    pub const fn sequence(self) -> u32 {
        self.sequence
    }
}

/// Deferred-task seam between the game and whatever drives time.
///
/// Implementations arrange for [`MemoryGame::fire`](crate::MemoryGame::fire) to be called with the
/// ticket once `delay` has passed.
pub trait ResolveScheduler {
    fn schedule(&mut self, delay: Duration, ticket: ResolveTicket);

    fn cancel(&mut self, ticket: ResolveTicket);
}

/// Scheduler on a virtual clock, advanced explicitly by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualScheduler {
    now: Duration,
    queue: Vec<(Duration, ResolveTicket)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Moves the clock forward, returning the tickets that came due in due order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ResolveTicket> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;

        let mut due: Vec<_> = self.queue.iter().copied().filter(|&(at, _)| at <= now).collect();
        self.queue.retain(|&(at, _)| at > now);
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }
}

impl ResolveScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, ticket: ResolveTicket) {
        self.queue.push((self.now.saturating_add(delay), ticket));
    }

    fn cancel(&mut self, ticket: ResolveTicket) {
        self.queue.retain(|&(_, queued)| queued != ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn tickets_come_due_after_their_delay() {
        let mut scheduler = ManualScheduler::new();
        let ticket = ResolveTicket::new(0, 1);
        scheduler.schedule(Duration::from_millis(1000), ticket);

        assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![ticket]);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.now(), Duration::from_secs(1));
    }

    #[test]
    fn due_tickets_are_returned_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let late = ResolveTicket::new(0, 1);
        let early = ResolveTicket::new(0, 2);
        scheduler.schedule(Duration::from_secs(3), late);
        scheduler.schedule(Duration::from_secs(1), early);

        assert_eq!(scheduler.advance(Duration::from_secs(5)), vec![early, late]);
    }

    #[test]
    fn cancelled_ticket_never_comes_due() {
        let mut scheduler = ManualScheduler::new();
        let ticket = ResolveTicket::new(3, 7);
        scheduler.schedule(Duration::from_secs(1), ticket);
        scheduler.cancel(ticket);

        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
    }
}
