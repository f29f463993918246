//! Generic egui helpers shared by the card, eye, and attractor views.
//!
//! Stateless functions only: colour conversion, paragraph layout, the
//! position dots under the card, and point-cloud painting.

use eframe::egui;
use iris_folio::attractor::TracerPoint;
use iris_folio::content::markup::paragraphs;

// ─── Colour ───────────────────────────────────────────────────────────────────

/// Normalized RGBA → egui colour (alpha not premultiplied).
pub fn color32(c: [f32; 4]) -> egui::Color32 {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), to_u8(c[3]))
}

pub fn lerp_color(a: egui::Color32, b: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

// ─── Text ─────────────────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

/// Lay out an HTML body fragment as wrapped paragraphs.
pub fn body_text(ui: &mut egui::Ui, html: &str, size: f32) {
    for p in paragraphs(html) {
        ui.label(egui::RichText::new(p).size(size));
        ui.add_space(8.0);
    }
}

// ─── Deck position ────────────────────────────────────────────────────────────

/// A row of dots, the current position filled.
pub fn position_dots(ui: &mut egui::Ui, len: usize, position: usize) {
    const R: f32 = 3.0;
    const GAP: f32 = 10.0;
    let width = len as f32 * GAP;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, R * 3.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let color = ui.visuals().text_color();
    for i in 0..len {
        let c = egui::pos2(rect.left() + GAP * (i as f32 + 0.5), rect.center().y);
        if i == position {
            painter.circle_filled(c, R, color);
        } else {
            painter.circle_stroke(c, R, egui::Stroke::new(1.0, color.gamma_multiply(0.5)));
        }
    }
}

// ─── Point cloud ──────────────────────────────────────────────────────────────

/// Paint a model-space point cloud orthographically into `rect`.
///
/// Model units are scaled so a radius of `extent` fills the shorter side.
pub fn paint_point_cloud(painter: &egui::Painter, rect: egui::Rect, points: &[TracerPoint], extent: f32) {
    let scale = rect.width().min(rect.height()) * 0.5 / extent.max(1e-3);
    let center = rect.center();
    for p in points {
        let pos = egui::pos2(center.x + p.position.x * scale, center.y - p.position.y * scale);
        if rect.contains(pos) {
            painter.circle_filled(pos, 1.2, color32(p.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_str("Möbius-Klein", 8), "Möbiu...");
        assert_eq!(truncate_str("short", 8), "short");
    }

    #[test]
    fn color_conversion_clamps() {
        assert_eq!(color32([2.0, 0.0, -1.0, 1.0]), egui::Color32::from_rgb(255, 0, 0));
    }
}
