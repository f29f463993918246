//! Single-shot completion signal for card transitions.
//!
//! The deck hands one [`CompletionSignal`] to the renderer per accepted
//! transition. Firing consumes the signal, so a given signal resolves at
//! most once; the deck additionally ignores tickets that don't match the
//! transition currently in flight.

use std::sync::mpsc;

/// Identifies one accepted transition.
pub type Ticket = u64;

/// Fired by the renderer when its visual transition has finished.
#[derive(Debug)]
#[must_use = "the deck stays locked until this signal fires"]
pub struct CompletionSignal {
    ticket: Ticket,
    tx: mpsc::Sender<Ticket>,
}

impl CompletionSignal {
    pub(crate) fn new(ticket: Ticket, tx: mpsc::Sender<Ticket>) -> Self {
        Self { ticket, tx }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Report completion. The deck picks it up on its next poll.
    pub fn fire(self) {
        // Receiver only disappears with the deck itself
        let _ = self.tx.send(self.ticket);
    }
}
