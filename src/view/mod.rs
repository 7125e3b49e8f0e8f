//! State machines behind the search results area and the detail overlay.
//!
//! Both follow the same shape: a user event goes in, the machine updates
//! its state and may hand back a command naming the request to run. The
//! command carries a [`Ticket`]; the response is fed back with that
//! ticket and ignored if a newer request has been issued since.

pub mod overlay;
pub mod search;

pub use overlay::{CloseTrigger, DetailCommand, DetailPane, OverlayController, OverlayState};
pub use search::{
    LoadingPlaceholder, Outcome, Request, SearchCommand, SearchController, SearchView,
    SUGGESTIONS,
};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Monotonic ticket source; only the most recently issued ticket is current
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    latest: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Make every issued ticket stale without issuing a new one
    pub(crate) fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut counter = TicketCounter::default();
        let first = counter.issue();
        let second = counter.issue();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));

        counter.invalidate();
        assert!(!counter.is_current(second));
    }
}
