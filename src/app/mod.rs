//! `PortfolioApp`: the top-level egui application state.
//!
//! This module declares the app struct and its frame loop. Drawing and
//! input handling live in the sibling modules:
//!
//! - `navigation`: egui events to directional inputs, routed to the session
//! - `content`: card rendering and slide transitions
//! - `eye`: the orienting eye widget

pub mod content;
pub mod eye;
pub mod navigation;

use std::time::Instant;

use eframe::egui;

use iris_folio::gallery::thumbnail::ThumbnailLoader;
use iris_folio::input::touch::GestureRecognizer;
use iris_folio::session::Session;

use content::{CardAssets, CardView};

/// Frames longer than this are treated as a stall, not as elapsed motion.
const MAX_FRAME_DT: f32 = 0.1;
const EYE_SIZE: f32 = 160.0;

pub struct PortfolioApp {
    pub session: Session<CardView>,
    pub assets: CardAssets,
    pub gestures: GestureRecognizer,
    pub last_frame: Instant,
}

impl PortfolioApp {
    pub fn new(session: Session<CardView>) -> Self {
        let gallery = &session.config().gallery;
        let thumbnails = ThumbnailLoader::new(gallery.oembed_endpoint.clone(), gallery.timeout_secs);
        Self {
            session,
            assets: CardAssets::new(thumbnails),
            gestures: GestureRecognizer::default(),
            last_frame: Instant::now(),
        }
    }

    fn draw_footer(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let response = eye::draw_eye(ui, self.session.orientation(), EYE_SIZE);
            if let Some(input) = navigation::eye_click(&response) {
                self.dispatch([input]);
            }
            if let Some(deck) = self.session.deck() {
                ui.add_space(6.0);
                crate::ui::position_dots(ui, deck.len(), deck.position());
            }
            ui.add_space(4.0);
        });
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;

        self.assets.poll();

        let inputs = self.collect_input(ctx);
        self.dispatch(inputs);

        // Finish the slide before the deck polls for completions
        let sliding = self.session.renderer_mut().update(now);
        let animating = self.session.frame(dt);

        egui::TopBottomPanel::bottom("eye")
            .resizable(false)
            .show(ctx, |ui| self.draw_footer(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let points = self.session.interactive().map(|sim| sim.points());
            self.session
                .renderer()
                .show(ui, &mut self.assets, points, now);
        });

        if sliding || animating || self.assets.thumbnails.pending_count() > 0 {
            ctx.request_repaint();
        }
    }
}
