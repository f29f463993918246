//! Perspective projection of the iris onto the eyeball's screen disc.
//!
//! The eye is a sphere of radius `radius` centred in a square viewport.
//! The iris rests at the front pole `(0, 0, radius)` and follows the
//! controller's rotation. Screen y grows downward.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

/// Fold an angle that may carry whole laps into `[-π, π)`.
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Fixed camera and eyeball proportions.
#[derive(Debug, Clone, Copy)]
pub struct EyeGeometry {
    /// Viewport side length in pixels
    pub size: f32,
    /// Eyeball radius as a fraction of `size`
    pub radius_ratio: f32,
    /// Iris radius as a fraction of the eyeball radius
    pub iris_ratio: f32,
    pub focal_length: f32,
    pub camera_z: f32,
}

impl Default for EyeGeometry {
    fn default() -> Self {
        Self {
            size: 300.0,
            radius_ratio: 0.4,
            iris_ratio: 0.35,
            focal_length: 300.0,
            camera_z: 200.0,
        }
    }
}

/// Where and how to draw the iris for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeProjection {
    /// Iris centre on screen, relative to the viewport's top-left corner
    pub iris_center: [f32; 2],
    /// Foreshortened iris radius before ellipse scaling
    pub iris_radius: f32,
    /// Horizontal / vertical squash of the iris disc
    pub ellipse_scale: [f32; 2],
    /// Specular highlight centre on the eyeball
    pub highlight: [f32; 2],
    /// False when the iris has rotated onto the far hemisphere
    pub visible: bool,
    /// Iris depth in `[-1, 1]` (1 = facing the viewer)
    pub depth: f32,
}

impl EyeGeometry {
    pub fn radius(&self) -> f32 {
        self.size * self.radius_ratio
    }

    pub fn center(&self) -> [f32; 2] {
        [self.size * 0.5, self.size * 0.5]
    }

    /// Project the iris for the given orientation and displayed angles.
    ///
    /// Angles may include laps; only their direction matters here.
    pub fn project(&self, rotation: Quat, yaw: f32, pitch: f32) -> EyeProjection {
        let (yaw, pitch) = (wrap_angle(yaw), wrap_angle(pitch));
        let r = self.radius();
        let [cx, cy] = self.center();
        let p = rotation * Vec3::new(0.0, 0.0, r);

        let scale = self.focal_length / (self.focal_length + self.camera_z - p.z).max(1e-3);
        let depth = if r > 0.0 { p.z / r } else { 0.0 };
        let iris_radius = r * self.iris_ratio * scale * depth.max(0.0);

        EyeProjection {
            iris_center: [cx + p.x * scale, cy - p.y * scale],
            iris_radius,
            ellipse_scale: [yaw.cos().abs() * 0.5 + 0.5, pitch.cos().abs() * 0.5 + 0.5],
            highlight: [cx - yaw * 10.0, cy - pitch * 10.0],
            visible: p.z > 0.0,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::compose;

    #[test]
    fn resting_iris_is_centred_and_full_size() {
        let g = EyeGeometry::default();
        let e = g.project(Quat::IDENTITY, 0.0, 0.0);
        assert!(e.visible);
        assert!((e.iris_center[0] - 150.0).abs() < 1e-3);
        assert!((e.iris_center[1] - 150.0).abs() < 1e-3);
        // z = r, so scale = focal / (focal + camera_z - r)
        let scale = 300.0 / (300.0 + 200.0 - 120.0);
        assert!((e.iris_radius - 120.0 * 0.35 * scale).abs() < 1e-3);
        assert_eq!(e.ellipse_scale, [1.0, 1.0]);
    }

    #[test]
    fn positive_yaw_moves_iris_right_and_negative_pitch_moves_it_up() {
        let g = EyeGeometry::default();
        let e = g.project(compose(0.5, 0.0), 0.5, 0.0);
        assert!(e.iris_center[0] > 150.0);
        let e = g.project(compose(0.0, -0.5), 0.0, -0.5);
        assert!(e.iris_center[1] < 150.0);
    }

    #[test]
    fn whole_laps_project_like_rest() {
        let g = EyeGeometry::default();
        let rest = g.project(Quat::IDENTITY, 0.0, 0.0);
        let lapped = g.project(compose(4.0 * PI, -2.0 * PI), 4.0 * PI, -2.0 * PI);
        for i in 0..2 {
            assert!((rest.highlight[i] - lapped.highlight[i]).abs() < 1e-3);
            assert!((rest.ellipse_scale[i] - lapped.ellipse_scale[i]).abs() < 1e-4);
            assert!((rest.iris_center[i] - lapped.iris_center[i]).abs() < 1e-2);
        }
    }

    #[test]
    fn highlight_stays_on_the_eyeball() {
        let g = EyeGeometry::default();
        let [cx, cy] = g.center();
        for k in 0..40 {
            let yaw = k as f32 * 0.7;
            let e = g.project(compose(yaw, -yaw), yaw, -yaw);
            let d = ((e.highlight[0] - cx).powi(2) + (e.highlight[1] - cy).powi(2)).sqrt();
            assert!(d < g.radius(), "highlight {} px out at yaw {}", d, yaw);
        }
    }

    #[test]
    fn wrap_angle_folds_laps() {
        assert!(wrap_angle(0.0).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
        assert!(wrap_angle(3.0 * PI + 0.1) < 0.0);
    }

    #[test]
    fn back_facing_iris_is_hidden() {
        let g = EyeGeometry::default();
        let e = g.project(compose(PI, 0.0), PI, 0.0);
        assert!(!e.visible);
        assert_eq!(e.iris_radius, 0.0);
    }
}
