//! Card view: draws the current entry and animates the slide between cards.
//!
//! `CardView` is the session's [`CardRenderer`]. It holds the completion
//! signal of the transition in flight and fires it from [`CardView::update`]
//! once the slide has run its course, which is what unlocks the deck.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use eframe::egui;
use iris_folio::attractor::TracerPoint;
use iris_folio::content::ContentEntry;
use iris_folio::deck::CompletionSignal;
use iris_folio::gallery::thumbnail::{canonical_video_url, Thumbnail, ThumbnailLoader};
use iris_folio::input::SlideHint;
use iris_folio::session::CardRenderer;

use crate::ui::{body_text, paint_point_cloud, truncate_str};

pub const SLIDE_DURATION: Duration = Duration::from_millis(350);
const CARD_MAX_WIDTH: f32 = 640.0;
/// Model-space radius that fills the attractor canvas.
const ATTRACTOR_EXTENT: f32 = 1.4;

struct Slide {
    outgoing: Option<ContentEntry>,
    hint: Option<SlideHint>,
    started: Instant,
    signal: CompletionSignal,
}

#[derive(Default)]
pub struct CardView {
    current: Option<ContentEntry>,
    slide: Option<Slide>,
}

impl CardRenderer for CardView {
    fn render_entry(
        &mut self,
        entry: &ContentEntry,
        hint: Option<SlideHint>,
        on_complete: CompletionSignal,
    ) {
        // The deck never overlaps transitions; settle any leftover anyway
        if let Some(prev) = self.slide.take() {
            prev.signal.fire();
        }
        let outgoing = self.current.replace(entry.clone());
        self.slide = Some(Slide {
            outgoing,
            hint,
            started: Instant::now(),
            signal: on_complete,
        });
    }

    fn render_empty(&mut self) {
        self.current = None;
        self.slide = None;
    }
}

impl CardView {
    /// Finish the slide if its time is up. Returns true while one is running.
    pub fn update(&mut self, now: Instant) -> bool {
        let done = self
            .slide
            .as_ref()
            .is_some_and(|s| now.duration_since(s.started) >= SLIDE_DURATION);
        if done {
            if let Some(s) = self.slide.take() {
                s.signal.fire();
            }
        }
        self.slide.is_some()
    }

    /// Eased slide progress in `[0, 1]`; 1 when idle.
    fn progress(&self, now: Instant) -> f32 {
        match &self.slide {
            Some(s) => {
                let p = now.duration_since(s.started).as_secs_f32() / SLIDE_DURATION.as_secs_f32();
                ease_out_cubic(p.clamp(0.0, 1.0))
            }
            None => 1.0,
        }
    }

    /// Draw into the remaining space of `ui`.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        assets: &mut CardAssets,
        points: Option<&[TracerPoint]>,
        now: Instant,
    ) {
        let rect = ui.available_rect_before_wrap();
        let Some(current) = &self.current else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Nothing to show yet.").weak());
            });
            return;
        };

        let p = self.progress(now);
        let hint = self.slide.as_ref().and_then(|s| s.hint);
        let (incoming, outgoing) = slide_offsets(hint, rect.size(), p);

        if let Some(prev) = self.slide.as_ref().and_then(|s| s.outgoing.as_ref()) {
            draw_at(ui, rect, outgoing, prev, assets, None, "outgoing");
        }
        draw_at(ui, rect, incoming, current, assets, points, "current");
        ui.advance_cursor_after_rect(rect);
    }
}

fn ease_out_cubic(p: f32) -> f32 {
    1.0 - (1.0 - p).powi(3)
}

/// Offsets of the incoming and outgoing cards at progress `p`.
///
/// The incoming card enters from the side the hint names; with no hint it
/// appears in place.
fn slide_offsets(hint: Option<SlideHint>, size: egui::Vec2, p: f32) -> (egui::Vec2, egui::Vec2) {
    let dir = match hint {
        Some(SlideHint::Right) => egui::vec2(size.x, 0.0),
        Some(SlideHint::Left) => egui::vec2(-size.x, 0.0),
        Some(SlideHint::Down) => egui::vec2(0.0, size.y),
        Some(SlideHint::Up) => egui::vec2(0.0, -size.y),
        None => egui::Vec2::ZERO,
    };
    (dir * (1.0 - p), -dir * p)
}

fn draw_at(
    ui: &mut egui::Ui,
    area: egui::Rect,
    offset: egui::Vec2,
    entry: &ContentEntry,
    assets: &mut CardAssets,
    points: Option<&[TracerPoint]>,
    salt: &str,
) {
    let width = area.width().min(CARD_MAX_WIDTH);
    let card = egui::Rect::from_min_size(
        egui::pos2(area.center().x - width * 0.5, area.top()),
        egui::vec2(width, area.height()),
    )
    .translate(offset);

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .id_salt(salt)
            .max_rect(card)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_clip_rect(area.intersect(ui.clip_rect()));
    draw_card(&mut child, entry, assets, points);
}

fn draw_card(
    ui: &mut egui::Ui,
    entry: &ContentEntry,
    assets: &mut CardAssets,
    points: Option<&[TracerPoint]>,
) {
    ui.add_space(24.0);
    ui.heading(entry.title());
    ui.add_space(8.0);

    match entry {
        ContentEntry::Intro { content, .. } | ContentEntry::Text { content, .. } => {
            body_text(ui, content, 16.0);
        }
        ContentEntry::Publication {
            venue,
            year,
            description,
            link,
            ..
        } => {
            let meta: Vec<&str> = [venue.as_str(), year.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !meta.is_empty() {
                ui.label(egui::RichText::new(meta.join(" · ")).italics().weak());
                ui.add_space(6.0);
            }
            body_text(ui, description, 15.0);
            if let Some(link) = link {
                ui.hyperlink_to("Read the paper", link);
            }
        }
        ContentEntry::Image { src, caption, .. } => {
            match assets.image(ui.ctx(), src) {
                Some(tex) => {
                    let size = fit_width(tex.size_vec2(), ui.available_width());
                    ui.add(egui::Image::new((tex.id(), size)));
                }
                None => {
                    ui.label(egui::RichText::new(truncate_str(src, 60)).monospace().weak());
                }
            }
            if !caption.is_empty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(caption).italics());
            }
        }
        ContentEntry::Video {
            embed_url,
            description,
            ..
        } => {
            if let Some(tex) = assets.video_thumbnail(ui.ctx(), embed_url) {
                let size = fit_width(tex.size_vec2(), ui.available_width());
                ui.add(egui::Image::new((tex.id(), size)));
                ui.add_space(6.0);
            }
            ui.hyperlink_to("▶ Watch", canonical_video_url(embed_url));
            ui.add_space(6.0);
            body_text(ui, description, 15.0);
        }
        ContentEntry::Code {
            description,
            tech,
            link,
            ..
        } => {
            body_text(ui, description, 15.0);
            if !tech.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    let chip = ui.visuals().faint_bg_color;
                    for t in tech {
                        ui.label(egui::RichText::new(t).monospace().background_color(chip));
                    }
                });
            }
            if let Some(link) = link {
                ui.add_space(6.0);
                ui.hyperlink_to("Source", link);
            }
        }
        ContentEntry::Interactive { description, .. } => {
            body_text(ui, description, 15.0);
            let width = ui.available_width();
            let height = ui.available_height().max(0.0);
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
            if let Some(points) = points {
                paint_point_cloud(&ui.painter_at(rect), rect, points, ATTRACTOR_EXTENT);
            }
        }
    }
}

/// Scale `size` down so it fits `max_width`, keeping aspect.
fn fit_width(size: egui::Vec2, max_width: f32) -> egui::Vec2 {
    if size.x <= max_width || size.x <= 0.0 {
        size
    } else {
        size * (max_width / size.x)
    }
}

// ─── Textures ────────────────────────────────────────────────────────────────

/// GPU textures for card images and video thumbnails.
///
/// Pixels arrive from the loader's worker threads; this side only uploads
/// finished ones.
pub struct CardAssets {
    pub thumbnails: ThumbnailLoader,
    textures: HashMap<String, egui::TextureHandle>,
}

impl CardAssets {
    pub fn new(thumbnails: ThumbnailLoader) -> Self {
        Self {
            thumbnails,
            textures: HashMap::new(),
        }
    }

    /// Collect finished downloads. Call every frame.
    pub fn poll(&mut self) {
        self.thumbnails.poll();
    }

    /// Image card source, from disk or over HTTP.
    fn image(&mut self, ctx: &egui::Context, src: &str) -> Option<egui::TextureHandle> {
        if !self.textures.contains_key(src) {
            self.thumbnails.request_image(src);
        }
        self.texture(ctx, src)
    }

    fn video_thumbnail(&mut self, ctx: &egui::Context, embed_url: &str) -> Option<egui::TextureHandle> {
        if !self.textures.contains_key(embed_url) {
            self.thumbnails.request(embed_url);
        }
        self.texture(ctx, embed_url)
    }

    /// Cached texture for `key`, uploading the loader's pixels on first use.
    fn texture(&mut self, ctx: &egui::Context, key: &str) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.textures.get(key) {
            return Some(tex.clone());
        }
        let data = self.thumbnails.get(key)?;
        let tex = ctx.load_texture(key, color_image(data), egui::TextureOptions::LINEAR);
        self.textures.insert(key.to_string(), tex.clone());
        Some(tex)
    }
}

fn color_image(data: &Thumbnail) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [data.width as usize, data.height as usize],
        &data.rgba,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_folio::content::catalog;
    use iris_folio::deck::NavigationDeck;
    use iris_folio::input::NavDirection;

    fn deck() -> NavigationDeck {
        let entries = catalog::all();
        let order = (0..entries.len()).collect();
        NavigationDeck::with_order(entries, order).unwrap()
    }

    #[test]
    fn slide_fires_completion_when_finished() {
        let mut deck = deck();
        let mut view = CardView::default();
        let t = deck.present().unwrap();
        view.render_entry(&t.entry, t.hint, t.signal);
        assert!(view.slide.is_some());
        assert!(deck.is_busy());

        // Not yet
        assert!(view.update(Instant::now()));
        assert!(!deck.poll_completions());

        assert!(!view.update(Instant::now() + SLIDE_DURATION * 2));
        assert!(deck.poll_completions());
        assert!(!deck.is_busy());
        assert_eq!(view.current.as_ref().unwrap().title(), deck.current_entry().title());
    }

    #[test]
    fn next_slide_keeps_outgoing_card() {
        let mut deck = deck();
        let mut view = CardView::default();
        let t = deck.present().unwrap();
        view.render_entry(&t.entry, t.hint, t.signal);
        view.update(Instant::now() + SLIDE_DURATION * 2);
        deck.poll_completions();

        let first = view.current.as_ref().unwrap().title().to_string();
        let t = deck.advance(NavDirection::Forward, Some(SlideHint::Right)).unwrap();
        view.render_entry(&t.entry, t.hint, t.signal);
        let slide = view.slide.as_ref().unwrap();
        assert_eq!(slide.outgoing.as_ref().unwrap().title(), first);
        assert_eq!(slide.hint, Some(SlideHint::Right));
    }

    #[test]
    fn offsets_meet_at_the_ends() {
        let size = egui::vec2(400.0, 300.0);
        let (inc, out) = slide_offsets(Some(SlideHint::Right), size, 0.0);
        assert_eq!(inc, egui::vec2(400.0, 0.0));
        assert_eq!(out, egui::Vec2::ZERO);
        let (inc, out) = slide_offsets(Some(SlideHint::Up), size, 1.0);
        assert_eq!(inc, egui::Vec2::ZERO);
        assert_eq!(out, egui::vec2(0.0, 300.0));
        assert_eq!(slide_offsets(None, size, 0.3).0, egui::Vec2::ZERO);
    }

    #[test]
    fn image_texture_appears_once_loaded() {
        use iris_folio::error::GalleryError;
        use iris_folio::gallery::thumbnail::Fetcher;
        use std::sync::Arc;

        let pixels: Fetcher = Arc::new(|_: &str| -> Result<Thumbnail, GalleryError> {
            Ok(Thumbnail {
                width: 3,
                height: 2,
                rgba: vec![255; 3 * 2 * 4],
            })
        });
        let mut assets = CardAssets::new(ThumbnailLoader::with_fetchers(Arc::clone(&pixels), pixels));
        let ctx = egui::Context::default();

        let mut tex = assets.image(&ctx, "images/warp.png");
        for _ in 0..400 {
            if tex.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
            assets.poll();
            tex = assets.image(&ctx, "images/warp.png");
        }
        assert_eq!(tex.map(|t| t.size()), Some([3, 2]));
        assert_eq!(assets.thumbnails.pending_count(), 0);
    }

    #[test]
    fn fit_width_keeps_aspect() {
        assert_eq!(fit_width(egui::vec2(800.0, 400.0), 400.0), egui::vec2(400.0, 200.0));
        assert_eq!(fit_width(egui::vec2(100.0, 50.0), 400.0), egui::vec2(100.0, 50.0));
    }
}
