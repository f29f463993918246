//! Eye widget: a shaded sphere whose iris follows the orientation controller.

use eframe::egui;
use iris_folio::orientation::eye::EyeGeometry;
use iris_folio::orientation::OrientationController;

use crate::ui::lerp_color;

/// Concentric rings used to fake the sphere's radial gradient.
const SHADING_RINGS: usize = 24;

/// Filled axis-aligned ellipse as a convex polygon.
fn ellipse(center: egui::Pos2, radii: egui::Vec2, fill: egui::Color32) -> egui::Shape {
    const SEGMENTS: usize = 48;
    let points = (0..SEGMENTS)
        .map(|i| {
            let a = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            center + egui::vec2(a.cos() * radii.x, a.sin() * radii.y)
        })
        .collect();
    egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE)
}

/// Draw the eye filling a square `size` × `size` widget. Returns the response
/// so the caller can turn clicks into navigation.
pub fn draw_eye(
    ui: &mut egui::Ui,
    controller: &OrientationController,
    size: f32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    let painter = ui.painter_at(rect);

    let geometry = EyeGeometry {
        size,
        ..EyeGeometry::default()
    };
    let yaw = controller.yaw.current_angle;
    let pitch = controller.pitch.current_angle;
    let proj = geometry.project(controller.rotation(), yaw, pitch);

    let origin = rect.min.to_vec2();
    let center = egui::pos2(geometry.center()[0], geometry.center()[1]) + origin;
    let radius = geometry.radius();
    let highlight = egui::pos2(proj.highlight[0], proj.highlight[1]) + origin;

    // Sphere: rings shrink toward the highlight, darkest at the rim
    let rim = egui::Color32::from_rgb(0xa0, 0xa0, 0xa0);
    let mid = egui::Color32::from_rgb(0xd0, 0xd0, 0xd0);
    let glow = egui::Color32::WHITE;
    for i in 0..SHADING_RINGS {
        let t = i as f32 / (SHADING_RINGS - 1) as f32;
        let r = radius * (1.0 - t);
        let c = center + (highlight - center) * t;
        let color = if t < 0.5 {
            lerp_color(rim, mid, t * 2.0)
        } else {
            lerp_color(mid, glow, (t - 0.5) * 2.0)
        };
        painter.circle_filled(c, r.max(0.5), color);
    }

    if proj.visible && proj.iris_radius > 0.5 {
        let iris_center = egui::pos2(proj.iris_center[0], proj.iris_center[1]) + origin;
        let radii = egui::vec2(
            proj.iris_radius * proj.ellipse_scale[0],
            proj.iris_radius * proj.ellipse_scale[1],
        );
        painter.add(ellipse(iris_center, radii, egui::Color32::from_rgb(0x1a, 0x1a, 0x1a)));
        painter.add(ellipse(iris_center, radii * 0.45, egui::Color32::BLACK));
        // Catch-light, up and to the left
        painter.circle_filled(
            iris_center - radii * 0.3,
            (radii.min_elem() * 0.18).max(1.0),
            egui::Color32::from_white_alpha(140),
        );
    }

    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(2.0, egui::Color32::from_black_alpha(50)),
    );

    response
}
