//! Page-level controllers.
//!
//! Each controller owns the display state for one page and moves through
//! `Idle -> Loading -> {Ready, Failed}`, re-entering `Loading` whenever an
//! input it depends on changes. Requests cannot be cancelled, so every
//! request carries a `Ticket` from a per-controller monotonic counter and a
//! response is applied only when its ticket is still the latest one issued.

pub mod detail;
pub mod home;
pub mod listing;
pub mod newsletter;

#[cfg(test)]
pub(crate) mod testing;

pub use detail::{DetailController, DetailView};
pub use home::HomeController;
pub use listing::ListingController;
pub use newsletter::NewsletterForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one outstanding request of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub(crate) struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
