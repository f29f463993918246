//! Orientation controller for the eye.
//!
//! Discrete turns set a target angle per axis; [`OrientationController::tick`]
//! eases the displayed angle toward it every frame. Two policies exist:
//!
//! - **Bounded**: the target is clamped to `±max_angle`.
//! - **Back zone**: each axis walks discrete zones `-K..=K`. One step past
//!   either edge enters a single back zone. From there, pushing on in the
//!   same direction comes out at the opposite edge and counts a lap;
//!   pushing back returns to the edge you came from.
//!
//! Yaw and pitch run independent state machines.

pub mod eye;

use std::f32::consts::{PI, TAU};

use glam::Quat;

use crate::config::{OrientationConfig, OrientationMode};
use crate::input::{Axis, Turn};

/// Frame interval that `smoothing_factor` is calibrated against.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// State of one rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    /// Displayed angle, eased toward `target_angle`
    pub current_angle: f32,
    pub target_angle: f32,
    /// Full revolutions taken through the back zone
    pub lap: i32,
    /// Zone in `-K..=K`; while `at_back_zone` it holds the edge last occupied
    pub zone_position: i32,
    pub at_back_zone: bool,
    /// Sign of the step that entered the back zone
    pub entered_back_from: i32,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            current_angle: 0.0,
            target_angle: 0.0,
            lap: 0,
            zone_position: 0,
            at_back_zone: false,
            entered_back_from: 1,
        }
    }
}

impl AxisState {
    /// Clamped step for bounded mode.
    fn push_bounded(&mut self, sign: i32, step: f32, max_angle: f32) {
        self.target_angle = (self.target_angle + sign as f32 * step).clamp(-max_angle, max_angle);
    }

    /// Zone step for back-zone mode. `k` is the outermost front zone.
    fn push_zone(&mut self, sign: i32, k: i32) {
        if self.at_back_zone {
            if sign == self.entered_back_from {
                // Through the back, out the opposite edge
                self.at_back_zone = false;
                self.zone_position = -sign * k;
                self.lap += sign;
            } else {
                // Back the way we came
                self.at_back_zone = false;
                self.zone_position = self.entered_back_from * k;
            }
        } else {
            let next = self.zone_position + sign;
            if next.abs() > k {
                self.at_back_zone = true;
                self.entered_back_from = sign;
                self.zone_position = sign * k;
            } else {
                self.zone_position = next;
            }
        }
    }

    /// Target angle implied by the discrete zone state.
    fn zone_target(&self, step: f32) -> f32 {
        let base = self.lap as f32 * TAU;
        if self.at_back_zone {
            base + self.entered_back_from as f32 * PI
        } else {
            base + self.zone_position as f32 * step
        }
    }

    /// Ease toward the target. Returns true while still moving.
    fn ease(&mut self, blend: f32, epsilon: f32) -> bool {
        let gap = self.target_angle - self.current_angle;
        if gap.abs() <= epsilon {
            self.current_angle = self.target_angle;
            return false;
        }
        self.current_angle += gap * blend;
        true
    }
}

#[derive(Debug, Clone)]
pub struct OrientationController {
    config: OrientationConfig,
    pub yaw: AxisState,
    pub pitch: AxisState,
}

impl OrientationController {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config: config.sanitized(),
            yaw: AxisState::default(),
            pitch: AxisState::default(),
        }
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Yaw => &self.yaw,
            Axis::Pitch => &self.pitch,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Yaw => &mut self.yaw,
            Axis::Pitch => &mut self.pitch,
        }
    }

    /// Apply one directional step. Never rejected.
    pub fn handle_input(&mut self, turn: Turn) {
        let sign = turn.sign.signum();
        if sign == 0 {
            return;
        }
        let OrientationConfig {
            mode,
            step,
            max_angle,
            zone_steps,
            ..
        } = self.config;
        let state = self.axis_mut(turn.axis);
        match mode {
            OrientationMode::Bounded => state.push_bounded(sign, step, max_angle),
            OrientationMode::BackZone => {
                state.push_zone(sign, zone_steps);
                state.target_angle = state.zone_target(step);
            }
        }
    }

    /// Advance displayed angles by one frame of `dt` seconds.
    ///
    /// At `dt == NOMINAL_DT` each axis closes exactly `smoothing_factor` of
    /// its remaining gap; other frame lengths are rescaled so the motion
    /// looks the same at any refresh rate. Returns true while moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let f = self.config.smoothing_factor.clamp(0.0, 1.0);
        let frames = (dt / NOMINAL_DT).max(0.0);
        let blend = 1.0 - (1.0 - f).powf(frames);
        let eps = self.config.epsilon;
        let yaw_moving = self.yaw.ease(blend, eps);
        let pitch_moving = self.pitch.ease(blend, eps);
        yaw_moving || pitch_moving
    }

    pub fn is_settled(&self) -> bool {
        self.yaw.current_angle == self.yaw.target_angle
            && self.pitch.current_angle == self.pitch.target_angle
    }

    /// Displayed orientation: yaw applied first, then pitch.
    pub fn rotation(&self) -> Quat {
        compose(self.yaw.current_angle, self.pitch.current_angle)
    }

    /// Orientation the eye is heading toward.
    pub fn target_rotation(&self) -> Quat {
        compose(self.yaw.target_angle, self.pitch.target_angle)
    }
}

/// Yaw about +Y, then pitch about +X.
pub fn compose(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_x(pitch) * Quat::from_rotation_y(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn back_zone(k: i32) -> OrientationController {
        OrientationController::new(OrientationConfig {
            mode: OrientationMode::BackZone,
            zone_steps: k,
            ..OrientationConfig::default()
        })
    }

    fn settle(c: &mut OrientationController) {
        for _ in 0..2000 {
            if !c.tick(NOMINAL_DT) {
                break;
            }
        }
    }

    #[test]
    fn bounded_never_exceeds_max() {
        let mut c = OrientationController::new(OrientationConfig::bounded());
        let max = c.config().max_angle;
        for _ in 0..20 {
            c.handle_input(Turn::YAW_POS);
            c.handle_input(Turn::PITCH_NEG);
            c.tick(NOMINAL_DT);
        }
        settle(&mut c);
        assert!(c.yaw.current_angle.abs() <= max + 1e-5);
        assert!(c.pitch.current_angle.abs() <= max + 1e-5);
        assert!((c.yaw.current_angle - max).abs() < 1e-3);
        assert!((c.pitch.current_angle + max).abs() < 1e-3);
    }

    #[test]
    fn negative_max_angle_from_config_file_still_clamps() {
        let cfg = crate::config::SiteConfig::from_json(
            r#"{"orientation": {"mode": "bounded", "max_angle": -0.5}}"#,
        )
        .unwrap();
        let mut c = OrientationController::new(cfg.orientation);
        for _ in 0..10 {
            c.handle_input(Turn::YAW_POS);
        }
        assert!((c.yaw.target_angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hand_built_bad_config_is_repaired_on_construction() {
        let mut c = OrientationController::new(OrientationConfig {
            mode: OrientationMode::Bounded,
            max_angle: -0.25,
            ..OrientationConfig::bounded()
        });
        c.handle_input(Turn::PITCH_NEG);
        c.handle_input(Turn::PITCH_NEG);
        assert!((c.pitch.target_angle + 0.25).abs() < 1e-6);
        assert!(c.tick(NOMINAL_DT));
    }

    #[test]
    fn tick_closes_smoothing_fraction_per_nominal_frame() {
        let mut c = OrientationController::new(OrientationConfig::bounded());
        c.handle_input(Turn::YAW_POS);
        let target = c.yaw.target_angle;
        c.tick(NOMINAL_DT);
        assert!((c.yaw.current_angle - target * 0.12).abs() < 1e-5);
    }

    #[test]
    fn idle_ticks_converge_and_stop() {
        let mut c = back_zone(3);
        c.handle_input(Turn::YAW_POS);
        settle(&mut c);
        assert!(c.is_settled());
        assert!(!c.tick(NOMINAL_DT));
    }

    #[test]
    fn back_zone_scenario() {
        let mut c = back_zone(3);
        for _ in 0..3 {
            c.handle_input(Turn::YAW_POS);
        }
        assert_eq!(c.yaw.zone_position, 3);
        assert!(!c.yaw.at_back_zone);

        c.handle_input(Turn::YAW_POS);
        assert!(c.yaw.at_back_zone);
        assert_eq!(c.yaw.entered_back_from, 1);
        assert!((c.yaw.target_angle - PI).abs() < 1e-5);

        c.handle_input(Turn::YAW_POS);
        assert!(!c.yaw.at_back_zone);
        assert_eq!(c.yaw.zone_position, -3);
        assert_eq!(c.yaw.lap, 1);

        c.handle_input(Turn::YAW_NEG);
        assert!(c.yaw.at_back_zone);
        assert_eq!(c.yaw.entered_back_from, -1);
        assert!((c.yaw.target_angle - PI).abs() < 1e-5);
    }

    #[test]
    fn back_zone_return_the_way_you_came() {
        let mut c = back_zone(3);
        for _ in 0..4 {
            c.handle_input(Turn::PITCH_POS);
        }
        assert!(c.pitch.at_back_zone);
        c.handle_input(Turn::PITCH_NEG);
        assert!(!c.pitch.at_back_zone);
        assert_eq!(c.pitch.zone_position, 3);
        assert_eq!(c.pitch.lap, 0);
    }

    #[test]
    fn full_lap_target_is_continuous() {
        let mut c = back_zone(3);
        let step = c.config().step;
        let mut prev = c.yaw.target_angle;
        // 3 front steps, back zone, pass through, 3 more back to centre
        for _ in 0..8 {
            c.handle_input(Turn::YAW_POS);
            let t = c.yaw.target_angle;
            assert!(t > prev);
            assert!(t - prev <= step + 1e-5);
            prev = t;
        }
        assert_eq!(c.yaw.zone_position, 0);
        assert_eq!(c.yaw.lap, 1);
        assert!((c.yaw.target_angle - TAU).abs() < 1e-4);
    }

    #[test]
    fn negative_laps() {
        let mut c = back_zone(2);
        for _ in 0..4 {
            c.handle_input(Turn::YAW_NEG);
        }
        assert_eq!(c.yaw.lap, -1);
        assert_eq!(c.yaw.zone_position, 2);
    }

    #[test]
    fn axes_are_independent() {
        let mut c = back_zone(1);
        c.handle_input(Turn::YAW_POS);
        c.handle_input(Turn::YAW_POS);
        assert!(c.yaw.at_back_zone);
        assert_eq!(c.pitch, AxisState::default());
    }

    #[test]
    fn zero_sign_is_ignored() {
        let mut c = back_zone(3);
        c.handle_input(Turn { axis: Axis::Yaw, sign: 0 });
        assert_eq!(c.yaw, AxisState::default());
    }

    #[test]
    fn rotation_applies_yaw_before_pitch() {
        let yaw = 0.7;
        let pitch = -0.4;
        let q = compose(yaw, pitch);
        let v = Vec3::Z;
        let sequential = Quat::from_rotation_x(pitch) * (Quat::from_rotation_y(yaw) * v);
        assert!((q * v - sequential).length() < 1e-5);

        let swapped = Quat::from_rotation_y(yaw) * (Quat::from_rotation_x(pitch) * v);
        assert!((q * v - swapped).length() > 1e-3);
    }
}
