//! Navigation deck: the shuffled, cyclic sequence of cards.
//!
//! The intro card (if any) is pinned to the front; everything else is
//! Fisher–Yates shuffled once when the deck is built. Position moves
//! cyclically and at most one transition may be in flight: `advance`
//! returns [`NavError::Busy`] until the renderer fires the previous
//! transition's [`CompletionSignal`].

pub mod completion;

use std::sync::mpsc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::ContentEntry;
use crate::error::{DeckError, NavError};
use crate::input::{NavDirection, SlideHint};

pub use completion::{CompletionSignal, Ticket};

/// An accepted navigation step, ready to hand to the renderer.
#[derive(Debug)]
pub struct Transition {
    pub entry: ContentEntry,
    /// Deck position after the step
    pub position: usize,
    pub hint: Option<SlideHint>,
    pub signal: CompletionSignal,
}

/// Intro first, every other index shuffled behind it.
pub fn shuffled_order<R: Rng + ?Sized>(entries: &[ContentEntry], rng: &mut R) -> Vec<usize> {
    let intro = entries.iter().position(ContentEntry::is_intro);
    let mut rest: Vec<usize> = (0..entries.len()).filter(|&i| Some(i) != intro).collect();
    rest.shuffle(rng);

    let mut order = Vec::with_capacity(entries.len());
    order.extend(intro);
    order.extend(rest);
    order
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

pub struct NavigationDeck {
    entries: Vec<ContentEntry>,
    order: Vec<usize>,
    position: usize,
    in_flight: Option<Ticket>,
    next_ticket: Ticket,
    done_tx: mpsc::Sender<Ticket>,
    done_rx: mpsc::Receiver<Ticket>,
}

impl NavigationDeck {
    /// Build a deck with a fresh shuffle.
    pub fn initialize<R: Rng + ?Sized>(
        entries: Vec<ContentEntry>,
        rng: &mut R,
    ) -> Result<Self, DeckError> {
        if entries.is_empty() {
            return Err(DeckError::Empty);
        }
        let order = shuffled_order(&entries, rng);
        log::info!(
            "deck initialized: {} entries, intro {}",
            entries.len(),
            if entries[order[0]].is_intro() { "pinned" } else { "absent" }
        );
        Self::with_order(entries, order)
    }

    /// Build a deck with an explicit order (replays, tests).
    pub fn with_order(entries: Vec<ContentEntry>, order: Vec<usize>) -> Result<Self, DeckError> {
        if entries.is_empty() {
            return Err(DeckError::Empty);
        }
        if !is_permutation(&order, entries.len()) {
            return Err(DeckError::InvalidOrder { len: entries.len() });
        }
        let (done_tx, done_rx) = mpsc::channel();
        Ok(Self {
            entries,
            order,
            position: 0,
            in_flight: None,
            next_ticket: 0,
            done_tx,
            done_rx,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false for a constructed deck.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn current_entry(&self) -> &ContentEntry {
        &self.entries[self.order[self.position]]
    }

    /// Entry shown at an arbitrary deck position (wraps).
    pub fn entry_at(&self, position: usize) -> &ContentEntry {
        &self.entries[self.order[position % self.order.len()]]
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn begin(&mut self, hint: Option<SlideHint>) -> Transition {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(ticket);
        Transition {
            entry: self.current_entry().clone(),
            position: self.position,
            hint,
            signal: CompletionSignal::new(ticket, self.done_tx.clone()),
        }
    }

    /// Render request for the current card without moving (first paint).
    pub fn present(&mut self) -> Result<Transition, NavError> {
        self.poll_completions();
        if self.is_busy() {
            return Err(NavError::Busy);
        }
        Ok(self.begin(None))
    }

    /// Step one card in `direction`.
    ///
    /// A single-card deck stays put but still reports success.
    pub fn advance(
        &mut self,
        direction: NavDirection,
        hint: Option<SlideHint>,
    ) -> Result<Transition, NavError> {
        self.poll_completions();
        if self.is_busy() {
            log::debug!("advance {:?} dropped: transition in flight", direction);
            return Err(NavError::Busy);
        }

        let n = self.order.len();
        self.position = match direction {
            NavDirection::Forward => (self.position + 1) % n,
            NavDirection::Backward => (self.position + n - 1) % n,
        };
        Ok(self.begin(hint))
    }

    /// Release the lock for `ticket`. Stale or repeated tickets are ignored.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            log::debug!("ignoring stale completion for ticket {}", ticket);
            false
        }
    }

    /// Drain fired completion signals. Returns true if the lock was released.
    pub fn poll_completions(&mut self) -> bool {
        let mut released = false;
        while let Ok(ticket) = self.done_rx.try_recv() {
            released |= self.complete(ticket);
        }
        released
    }
}
