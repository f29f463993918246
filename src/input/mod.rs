//! Input vocabulary shared by the deck and the orientation controller.
//!
//! Every raw source (arrow keys, wheel, swipe, click) is normalized here
//! into a [`DirectionalInput`] before it reaches the core.

pub mod touch;

use touch::SwipeDirection;

/// Paging direction through the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}

impl NavDirection {
    /// Conventional slide hint: forward slides right, backward slides left.
    pub fn default_hint(self) -> SlideHint {
        match self {
            Self::Forward => SlideHint::Right,
            Self::Backward => SlideHint::Left,
        }
    }
}

/// Rendering hint for the card slide. Carries no navigation meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideHint {
    Left,
    Right,
    Up,
    Down,
}

/// Rotation axis of the eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Yaw,
    Pitch,
}

/// One step of rotation on one axis. `sign` is always ±1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub axis: Axis,
    pub sign: i32,
}

impl Turn {
    pub const YAW_POS: Self = Self { axis: Axis::Yaw, sign: 1 };
    pub const YAW_NEG: Self = Self { axis: Axis::Yaw, sign: -1 };
    pub const PITCH_POS: Self = Self { axis: Axis::Pitch, sign: 1 };
    pub const PITCH_NEG: Self = Self { axis: Axis::Pitch, sign: -1 };
}

/// A normalized directional input: what to page, how to turn, how to slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalInput {
    pub nav: NavDirection,
    pub turn: Turn,
    pub hint: SlideHint,
}

impl DirectionalInput {
    pub const RIGHT: Self = Self {
        nav: NavDirection::Forward,
        turn: Turn::YAW_POS,
        hint: SlideHint::Right,
    };
    pub const LEFT: Self = Self {
        nav: NavDirection::Backward,
        turn: Turn::YAW_NEG,
        hint: SlideHint::Left,
    };
    pub const DOWN: Self = Self {
        nav: NavDirection::Forward,
        turn: Turn::PITCH_POS,
        hint: SlideHint::Down,
    };
    pub const UP: Self = Self {
        nav: NavDirection::Backward,
        turn: Turn::PITCH_NEG,
        hint: SlideHint::Up,
    };
}

/// Arrow keys, independent of any windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

pub fn from_key(key: ArrowKey) -> DirectionalInput {
    match key {
        ArrowKey::Right => DirectionalInput::RIGHT,
        ArrowKey::Left => DirectionalInput::LEFT,
        ArrowKey::Down => DirectionalInput::DOWN,
        ArrowKey::Up => DirectionalInput::UP,
    }
}

/// Wheel delta in page convention (positive = scroll down).
///
/// Deltas within `dead_zone` are ignored so trackpad jitter doesn't page.
pub fn from_wheel(delta_y: f32, dead_zone: f32) -> Option<DirectionalInput> {
    if delta_y > dead_zone {
        Some(DirectionalInput::DOWN)
    } else if delta_y < -dead_zone {
        Some(DirectionalInput::UP)
    } else {
        None
    }
}

/// A finger swiping left pulls the next card in from the right.
pub fn from_swipe(direction: SwipeDirection) -> DirectionalInput {
    match direction {
        SwipeDirection::Left => DirectionalInput::RIGHT,
        SwipeDirection::Right => DirectionalInput::LEFT,
        SwipeDirection::Up => DirectionalInput::DOWN,
        SwipeDirection::Down => DirectionalInput::UP,
    }
}

/// Click-to-target: right half pages forward, left half backward.
pub fn from_click(x: f32, width: f32) -> Option<DirectionalInput> {
    if width <= 0.0 {
        return None;
    }
    if x >= width * 0.5 {
        Some(DirectionalInput::RIGHT)
    } else {
        Some(DirectionalInput::LEFT)
    }
}
