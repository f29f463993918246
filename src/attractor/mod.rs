//! Möbius-Klein attractor: a self-pacing particle-trail simulator.
//!
//! Each step re-evaluates every tracer on a closed-form surface at the
//! current `effective_time`, rotates the cloud by a slowly drifting
//! quaternion, and pushes the frame into a fixed-depth trail. The time
//! increment shrinks when the cloud moves fast and grows back when it
//! calms down, so apparent speed stays bounded without clamping.

pub mod palette;
pub mod surface;
pub mod trail;

use glam::{EulerRot, Quat, Vec3};
use rayon::prelude::*;

use crate::config::AttractorConfig;

pub use palette::Gradient;
pub use surface::Tracer;
pub use trail::{TracerPoint, TrailBuffer};

/// Deterministic wandering target for the cloud's rotation.
pub fn target_rotation(frame: u64) -> Quat {
    let f = frame as f32;
    Quat::from_euler(
        EulerRot::YXZ,
        (f * 0.0031).sin() * std::f32::consts::PI,
        (f * 0.0017 + 1.3).sin() * std::f32::consts::FRAC_PI_2,
        (f * 0.0023).cos() * std::f32::consts::FRAC_PI_4,
    )
}

/// Mean distance between matching samples of two frames.
fn mean_displacement(prev: &[Vec3], next: &[Vec3]) -> f32 {
    if prev.is_empty() || prev.len() != next.len() {
        return 0.0;
    }
    let total: f32 = prev.iter().zip(next).map(|(a, b)| a.distance(*b)).sum();
    total / prev.len() as f32
}

pub struct AttractorSimulator {
    config: AttractorConfig,
    tracers: Vec<Tracer>,
    /// Latest rotated positions, one per tracer
    positions: Vec<Vec3>,
    trail: TrailBuffer,
    gradient: Gradient,
    rotation: Quat,
    /// Accumulated in f64 so long sessions keep advancing
    effective_time: f64,
    dt: f32,
    frame: u64,
    points: Vec<TracerPoint>,
}

impl AttractorSimulator {
    pub fn new(config: AttractorConfig) -> Self {
        let tracers = surface::seed_tracers(config.num_tracers);
        let gradient = Gradient::from_hex(&config.gradient);
        Self {
            tracers,
            positions: Vec::new(),
            trail: TrailBuffer::new(config.trail_length),
            gradient,
            rotation: target_rotation(0),
            effective_time: 0.0,
            dt: config.base_dt.max(f32::EPSILON),
            frame: 0,
            points: Vec::new(),
            config,
        }
    }

    pub fn effective_time(&self) -> f64 {
        self.effective_time
    }

    /// Timestep used by the most recent step.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Current tracer heads.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Coloured point cloud from the last step, oldest trail frame first.
    pub fn points(&self) -> &[TracerPoint] {
        &self.points
    }

    pub fn step(&mut self) {
        // glam's slerp flips to the short arc and lerps when nearly parallel
        let target = target_rotation(self.frame);
        self.rotation = self
            .rotation
            .slerp(target, self.config.slerp_rate.clamp(0.0, 1.0))
            .normalize();

        let t = self.effective_time as f32;
        let rot = self.rotation;
        let next: Vec<Vec3> = self
            .tracers
            .par_iter()
            .map(|tr| rot * surface::sample(tr, t))
            .collect();

        let moved = mean_displacement(&self.positions, &next);
        let base_dt = self.config.base_dt.max(f32::EPSILON);
        let candidate = base_dt / (1.0 + self.config.alpha.max(0.0) * moved);
        let s = self.config.dt_smoothing.clamp(0.0, 1.0);
        self.dt = self.dt * (1.0 - s) + candidate * s;
        self.effective_time += f64::from(self.dt);

        self.positions = next;
        self.trail.push(self.positions.clone());
        self.points = self.trail.colorize(&self.gradient);
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(num_tracers: usize, trail_length: usize) -> AttractorSimulator {
        AttractorSimulator::new(AttractorConfig {
            num_tracers,
            trail_length,
            ..AttractorConfig::default()
        })
    }

    #[test]
    fn trail_length_is_fixed_once_filled() {
        let mut sim = small(32, 8);
        for i in 0..40 {
            sim.step();
            assert_eq!(sim.trail().len(), (i + 1).min(8));
        }
        assert_eq!(sim.points().len(), 32 * 8);
    }

    #[test]
    fn effective_time_strictly_increases() {
        let mut sim = small(64, 4);
        let mut prev = sim.effective_time();
        for _ in 0..300 {
            sim.step();
            assert!(sim.dt() > 0.0);
            assert!(sim.effective_time() > prev);
            prev = sim.effective_time();
        }
    }

    #[test]
    fn time_keeps_advancing_after_days_of_running() {
        let mut sim = small(8, 2);
        sim.effective_time = 300_000.0;
        for _ in 0..10 {
            let before = sim.effective_time();
            sim.step();
            assert!(sim.effective_time() > before);
        }
    }

    #[test]
    fn fast_motion_shrinks_timestep() {
        let mut sim = AttractorSimulator::new(AttractorConfig {
            num_tracers: 64,
            trail_length: 2,
            base_dt: 0.5,
            alpha: 50.0,
            dt_smoothing: 1.0,
            ..AttractorConfig::default()
        });
        sim.step();
        // First step has no previous frame: no displacement
        assert!((sim.dt() - 0.5).abs() < 1e-6);
        sim.step();
        assert!(sim.dt() < 0.5);
    }

    #[test]
    fn empty_configurations_produce_empty_cloud() {
        let mut none = small(0, 8);
        let mut no_trail = small(16, 0);
        for _ in 0..5 {
            none.step();
            no_trail.step();
        }
        assert!(none.points().is_empty());
        assert!(no_trail.points().is_empty());
        assert!(none.effective_time() > 0.0);
    }

    #[test]
    fn runs_are_replayable() {
        let mut a = small(16, 3);
        let mut b = small(16, 3);
        for _ in 0..20 {
            a.step();
            b.step();
        }
        assert_eq!(a.points(), b.points());
        assert_eq!(a.rotation(), b.rotation());
    }

    #[test]
    fn rotation_stays_unit_length() {
        let mut sim = small(4, 2);
        for _ in 0..500 {
            sim.step();
            assert!((sim.rotation().length() - 1.0).abs() < 1e-4);
        }
    }
}
