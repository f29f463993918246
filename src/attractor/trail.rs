//! Fixed-depth ring buffer of past tracer positions.

use std::collections::VecDeque;

use glam::Vec3;

use super::palette::Gradient;

/// Floor for the depth normalization range.
pub const MIN_Z_RANGE: f32 = 1e-6;

/// One coloured sample of the point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerPoint {
    pub position: Vec3,
    /// RGBA, alpha carries the age fade
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct TrailBuffer {
    capacity: usize,
    /// Oldest frame at the front
    frames: VecDeque<Vec<Vec3>>,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of frames held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Insert the newest frame, evicting the oldest once full.
    pub fn push(&mut self, frame: Vec<Vec3>) {
        if self.capacity == 0 {
            return;
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn newest(&self) -> Option<&[Vec3]> {
        self.frames.back().map(Vec::as_slice)
    }

    pub fn frames(&self) -> impl Iterator<Item = &[Vec3]> {
        self.frames.iter().map(Vec::as_slice)
    }

    /// `(z_min, z_range)` over every retained sample; range is floored.
    pub fn depth_range(&self) -> (f32, f32) {
        let (lo, hi) = self
            .frames
            .iter()
            .flatten()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            });
        if lo > hi {
            return (0.0, MIN_Z_RANGE);
        }
        (lo, (hi - lo).max(MIN_Z_RANGE))
    }

    /// Colour every retained sample by normalized depth, fading older frames.
    pub fn colorize(&self, gradient: &Gradient) -> Vec<TracerPoint> {
        let (z_min, z_range) = self.depth_range();
        let inv_range = 1.0 / z_range;
        let n = self.frames.len();
        let mut out = Vec::with_capacity(self.frames.iter().map(Vec::len).sum());

        for (age_idx, frame) in self.frames.iter().enumerate() {
            // Oldest frame fades to 1/n, newest is opaque
            let fade = (age_idx + 1) as f32 / n as f32;
            for &p in frame {
                let [r, g, b] = gradient.sample((p.z - z_min) * inv_range);
                out.push(TracerPoint {
                    position: p,
                    color: [r, g, b, fade],
                });
            }
        }
        out
    }
}
