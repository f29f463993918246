//! Input collection and routing for `PortfolioApp`.
//!
//! Arrow keys, the wheel, touch swipes and clicks on the eye are all
//! normalized to [`DirectionalInput`] and fed to the session one by one.
//! Inputs arriving while a slide is in flight are dropped by the deck.
//! Mouse drags never page, so text selection and canvas drags stay local.

use eframe::egui;

use iris_folio::input::touch::{Gesture, GestureRecognizer};
use iris_folio::input::{from_click, from_key, from_swipe, from_wheel, ArrowKey, DirectionalInput};
use iris_folio::session::Outcome;

use super::PortfolioApp;

/// Wheel deltas (in points) smaller than this are jitter.
const WHEEL_DEAD_ZONE: f32 = 1.0;

fn arrow_for(key: egui::Key) -> Option<ArrowKey> {
    match key {
        egui::Key::ArrowRight => Some(ArrowKey::Right),
        egui::Key::ArrowLeft => Some(ArrowKey::Left),
        egui::Key::ArrowDown => Some(ArrowKey::Down),
        egui::Key::ArrowUp => Some(ArrowKey::Up),
        _ => None,
    }
}

/// Feed one touch event to the recogniser; a finished swipe pages.
fn on_touch(
    gestures: &mut GestureRecognizer,
    phase: egui::TouchPhase,
    id: u64,
    pos: egui::Pos2,
) -> Option<DirectionalInput> {
    match phase {
        egui::TouchPhase::Start => {
            gestures.touch_start(pos.x, pos.y, id);
            None
        }
        egui::TouchPhase::Move => None,
        // Taps are handled by the widgets under the finger
        egui::TouchPhase::End => match gestures.touch_end(pos.x, pos.y, id) {
            Gesture::Swipe { direction, .. } => Some(from_swipe(direction)),
            _ => None,
        },
        egui::TouchPhase::Cancel => {
            gestures.cancel();
            None
        }
    }
}

/// Click on the eye widget: the half that was hit picks the direction.
pub fn eye_click(response: &egui::Response) -> Option<DirectionalInput> {
    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    from_click(pos.x - response.rect.left(), response.rect.width())
}

impl PortfolioApp {
    /// Keyboard, wheel and touch-swipe inputs for this frame, in arrival order.
    pub fn collect_input(&mut self, ctx: &egui::Context) -> Vec<DirectionalInput> {
        let gestures = &mut self.gestures;
        ctx.input(|i| {
            let mut out = Vec::new();

            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => {
                        if let Some(arrow) = arrow_for(*key) {
                            out.push(from_key(arrow));
                        }
                    }
                    egui::Event::Touch { id, phase, pos, .. } => {
                        out.extend(on_touch(gestures, *phase, id.0, *pos));
                    }
                    _ => {}
                }
            }

            // egui reports content motion; flip to page convention (down > 0)
            if let Some(d) = from_wheel(-i.raw_scroll_delta.y, WHEEL_DEAD_ZONE) {
                out.push(d);
            }

            out
        })
    }

    /// Route inputs to the session. Returns how many were accepted.
    pub fn dispatch(&mut self, inputs: impl IntoIterator<Item = DirectionalInput>) -> usize {
        let mut accepted = 0;
        for input in inputs {
            match self.session.handle(input) {
                Outcome::Accepted | Outcome::TurnedOnly => accepted += 1,
                Outcome::Busy => log::trace!("dropped {:?}: transition in flight", input.nav),
            }
        }
        accepted
    }
}
