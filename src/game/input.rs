//! Input collectors filled by the platform loop and read by scenes

/// Raw key codes, matching raylib's `KeyboardKey`
pub const KEY_SPACE: i32 = 32;
pub const KEY_RIGHT: i32 = 262;
pub const KEY_LEFT: i32 = 263;

/// Keys currently held down, as raw key codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardInput {
    keys: Vec<i32>,
}

impl KeyboardInput {
    pub fn add_key(&mut self, key: i32) {
        self.keys.push(key);
    }

    pub fn set_keys(&mut self, keys: Vec<i32>) {
        self.keys = keys;
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    pub fn keys(&self) -> &[i32] {
        &self.keys
    }
}

/// Touch points in window coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchInput {
    points: Vec<(f32, f32)>,
}

impl TouchInput {
    pub fn add_touch(&mut self, x: f32, y: f32) {
        self.points.push((x, y));
    }

    pub fn set_touches(&mut self, points: Vec<(f32, f32)>) {
        self.points = points;
    }

    pub fn clear_touches(&mut self) {
        self.points.clear();
    }

    pub fn touches(&self) -> &[(f32, f32)] {
        &self.points
    }
}

/// One frame of platform input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Every key that is down this frame
    pub held_keys: Vec<i32>,
    /// Keys that went down since the previous frame
    pub pressed_keys: Vec<i32>,
    pub touches: Vec<(f32, f32)>,
}
