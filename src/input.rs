use serde::{Deserialize, Serialize};

/// Per-tick steering request. `turn` is positive to the right, `throttle`
/// positive forward; both live in `[-1, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub turn: f32,
    pub throttle: f32,
}

impl DirectionalInput {
    pub const NEUTRAL: DirectionalInput = DirectionalInput {
        turn: 0.0,
        throttle: 0.0,
    };

    pub fn new(turn: f32, throttle: f32) -> DirectionalInput {
        DirectionalInput { turn, throttle }
    }

    pub fn clamped(self) -> DirectionalInput {
        DirectionalInput {
            turn: clamp_axis(self.turn),
            throttle: clamp_axis(self.throttle),
        }
    }
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

/// Non-finite or negative deltas become 0; the rest are capped at `max_delta`.
pub fn clamp_delta(delta_time: f32, max_delta: f32) -> f32 {
    if !delta_time.is_finite() || delta_time <= 0.0 {
        0.0
    } else {
        delta_time.min(max_delta)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DriveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl DriveKey {
    /// WASD, case-insensitive.
    pub fn from_char(c: char) -> Option<DriveKey> {
        match c.to_ascii_lowercase() {
            'w' => Some(DriveKey::Forward),
            's' => Some(DriveKey::Back),
            'a' => Some(DriveKey::Left),
            'd' => Some(DriveKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeyState {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl KeyState {
    pub fn new() -> KeyState {
        KeyState::default()
    }

    pub fn set(&mut self, key: DriveKey, pressed: bool) {
        match key {
            DriveKey::Forward => self.forward = pressed,
            DriveKey::Back => self.back = pressed,
            DriveKey::Left => self.left = pressed,
            DriveKey::Right => self.right = pressed,
        }
    }

    pub fn is_pressed(&self, key: DriveKey) -> bool {
        match key {
            DriveKey::Forward => self.forward,
            DriveKey::Back => self.back,
            DriveKey::Left => self.left,
            DriveKey::Right => self.right,
        }
    }

    pub fn release_all(&mut self) {
        *self = KeyState::default();
    }

    /// Opposite keys cancel out.
    pub fn movement_input(&self) -> DirectionalInput {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        DirectionalInput {
            turn: axis(self.right, self.left),
            throttle: axis(self.forward, self.back),
        }
    }
}
