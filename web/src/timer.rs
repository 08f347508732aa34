use core::time::Duration;
use gloo::timers::callback::Timeout;
use pairup_core::{ResolveScheduler, ResolveTicket};
use yew::Callback;

/// Browser-timer backed scheduler; each resolution becomes a `setTimeout` that
/// posts the ticket back to the component. Dropping a `Timeout` clears it.
#[derive(Debug)]
pub(crate) struct TimeoutScheduler {
    callback: Callback<ResolveTicket>,
    pending: Option<(ResolveTicket, Timeout)>,
}

impl TimeoutScheduler {
    pub(crate) fn new(callback: Callback<ResolveTicket>) -> Self {
        Self {
            callback,
            pending: None,
        }
    }
}

impl ResolveScheduler for TimeoutScheduler {
    fn schedule(&mut self, delay: Duration, ticket: ResolveTicket) {
        let callback = self.callback.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || callback.emit(ticket));
        self.pending = Some((ticket, timeout));
    }

    fn cancel(&mut self, ticket: ResolveTicket) {
        if self
            .pending
            .as_ref()
            .is_some_and(|(pending, _)| *pending == ticket)
        {
            self.pending = None;
        }
    }
}
