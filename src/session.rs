//! A viewing session: one deck, one eye, one renderer.
//!
//! Input handling follows a fixed order. The deck is asked first; only
//! when it accepts does the eye commit its turn and the renderer receive
//! the new card. Per-frame work (completion polling, easing, stepping a
//! mounted visualization) happens in [`Session::frame`].

use rand::Rng;

use crate::config::SiteConfig;
use crate::content::ContentEntry;
use crate::deck::{CompletionSignal, NavigationDeck, Transition};
use crate::error::NavError;
use crate::input::{DirectionalInput, SlideHint};
use crate::interactive::{Interactive, InteractiveRegistry};
use crate::orientation::OrientationController;

/// Rendering collaborator for card transitions.
///
/// Implementations must fire `on_complete` exactly once when the visual
/// transition ends; until then the deck rejects further paging.
pub trait CardRenderer {
    fn render_entry(
        &mut self,
        entry: &ContentEntry,
        hint: Option<SlideHint>,
        on_complete: CompletionSignal,
    );

    /// Called once when there is nothing to show.
    fn render_empty(&mut self) {}
}

/// What happened to one directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Deck moved and the eye turned
    Accepted,
    /// Dropped: a transition is in flight
    Busy,
    /// No deck; the eye turned on its own
    TurnedOnly,
}

pub struct Session<R: CardRenderer> {
    config: SiteConfig,
    deck: Option<NavigationDeck>,
    orientation: OrientationController,
    registry: InteractiveRegistry,
    mounted: Option<Box<dyn Interactive>>,
    renderer: R,
}

impl<R: CardRenderer> Session<R> {
    /// Shuffle `entries` and present the first card.
    pub fn start<G: Rng + ?Sized>(
        config: SiteConfig,
        entries: Vec<ContentEntry>,
        rng: &mut G,
        renderer: R,
    ) -> Self {
        let deck = match NavigationDeck::initialize(entries, rng) {
            Ok(deck) => Some(deck),
            Err(e) => {
                log::warn!("starting without a deck: {}", e);
                None
            }
        };
        Self::with_deck(config, deck, renderer)
    }

    /// Start from a prepared deck (fixed orders, replays).
    pub fn with_deck(config: SiteConfig, deck: Option<NavigationDeck>, renderer: R) -> Self {
        let mut session = Self {
            orientation: OrientationController::new(config.orientation.clone()),
            registry: InteractiveRegistry::default(),
            mounted: None,
            deck,
            renderer,
            config,
        };
        session.present_first();
        session
    }

    fn present_first(&mut self) {
        match self.deck.as_mut().map(NavigationDeck::present) {
            Some(Ok(t)) => self.show(t),
            Some(Err(e)) => log::debug!("initial render skipped: {}", e),
            None => self.renderer.render_empty(),
        }
    }

    fn show(&mut self, t: Transition) {
        self.mounted = t
            .entry
            .interactive_id()
            .and_then(|id| self.registry.mount(id, &self.config));
        self.renderer.render_entry(&t.entry, t.hint, t.signal);
    }

    /// Route one normalized input through deck, eye, and renderer.
    pub fn handle(&mut self, input: DirectionalInput) -> Outcome {
        let Some(deck) = self.deck.as_mut() else {
            self.orientation.handle_input(input.turn);
            return Outcome::TurnedOnly;
        };

        match deck.advance(input.nav, Some(input.hint)) {
            Ok(t) => {
                self.orientation.handle_input(input.turn);
                self.show(t);
                Outcome::Accepted
            }
            Err(NavError::Busy) => Outcome::Busy,
            Err(NavError::Empty) => Outcome::TurnedOnly,
        }
    }

    /// Per-frame update. Returns true while anything is still animating.
    pub fn frame(&mut self, dt: f32) -> bool {
        let released = self.deck.as_mut().is_some_and(NavigationDeck::poll_completions);
        let turning = self.orientation.tick(dt);
        if let Some(sim) = self.mounted.as_mut() {
            sim.step();
        }
        released || turning || self.mounted.is_some() || self.is_busy()
    }

    pub fn is_busy(&self) -> bool {
        self.deck.as_ref().is_some_and(NavigationDeck::is_busy)
    }

    pub fn deck(&self) -> Option<&NavigationDeck> {
        self.deck.as_ref()
    }

    pub fn current_entry(&self) -> Option<&ContentEntry> {
        self.deck.as_ref().map(NavigationDeck::current_entry)
    }

    pub fn orientation(&self) -> &OrientationController {
        &self.orientation
    }

    pub fn interactive(&self) -> Option<&dyn Interactive> {
        self.mounted.as_deref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
