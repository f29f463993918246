//! Touch gesture recognition.
//!
//! Turns raw touch start/end events into the two gestures the deck cares
//! about:
//! - Tap: short touch with little movement (treated as click-to-target)
//! - Swipe: movement past a distance threshold, classified by dominant axis

use std::time::{Duration, Instant};

/// Touch point
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub id: u64,
    pub time: Instant,
}

/// Recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap { x: f32, y: f32 },
    Swipe { direction: SwipeDirection, velocity: f32 },
    None,
}

/// Direction the finger travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Single-finger gesture state machine.
pub struct GestureRecognizer {
    start: Option<TouchPoint>,
    /// Minimum travel in pixels for a swipe
    swipe_threshold: f32,
    /// Maximum travel in pixels for a tap
    tap_slop: f32,
    /// Touches held longer than this are neither taps nor swipes
    max_duration: Duration,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl GestureRecognizer {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            start: None,
            swipe_threshold,
            tap_slop: 20.0,
            max_duration: Duration::from_millis(800),
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32, id: u64) {
        self.touch_start_at(x, y, id, Instant::now());
    }

    pub fn touch_start_at(&mut self, x: f32, y: f32, id: u64, time: Instant) {
        // Only the first finger counts
        if self.start.is_none() {
            self.start = Some(TouchPoint { x, y, id, time });
        }
    }

    pub fn touch_end(&mut self, x: f32, y: f32, id: u64) -> Gesture {
        self.touch_end_at(x, y, id, Instant::now())
    }

    pub fn touch_end_at(&mut self, x: f32, y: f32, id: u64, time: Instant) -> Gesture {
        let start = match self.start {
            Some(s) if s.id == id => s,
            _ => return Gesture::None,
        };
        self.start = None;

        let duration = time.saturating_duration_since(start.time);
        let dx = x - start.x;
        let dy = y - start.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist >= self.swipe_threshold {
            let velocity = dist / duration.as_secs_f32().max(0.001);
            let direction = if dx.abs() > dy.abs() {
                if dx > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            } else if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
            return Gesture::Swipe { direction, velocity };
        }

        if dist < self.tap_slop && duration < self.max_duration {
            return Gesture::Tap { x, y };
        }

        Gesture::None
    }

    /// Drop any in-progress touch (e.g. on cancel).
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
