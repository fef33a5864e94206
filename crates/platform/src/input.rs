//! Keyboard/mouse state collected from winit events and the fly controls driving the camera.

use std::collections::HashSet;

use corelib::camera::Camera;
use winit::keyboard::KeyCode;

/// World units per millisecond of frame time.
pub const MOVE_SPEED: f32 = 0.005;
/// Degrees per pixel of mouse motion.
pub const LOOK_SENSITIVITY: f32 = 0.15;
/// Movement multiplier while Left Ctrl is held.
pub const SLOW_FACTOR: f32 = 0.1;

/// Held keys and mouse motion accumulated since the last frame.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    mouse_delta: (f64, f64),
    grabbed: bool,
}

impl InputState {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    #[inline]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Forget everything held, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.mouse_delta = (0.0, 0.0);
    }

    /// Mouse motion only steers the camera while the cursor is grabbed.
    pub fn add_mouse_delta(&mut self, dx: f64, dy: f64) {
        if self.grabbed {
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
        }
    }

    pub fn take_mouse_delta(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.mouse_delta)
    }

    #[inline]
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn set_grabbed(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
        if !grabbed {
            self.mouse_delta = (0.0, 0.0);
        }
    }
}

/// Apply one frame of input to the camera.
///
/// Mouse right turns right and mouse up looks up (winit reports +y downwards).
pub fn apply_fly_controls(camera: &mut Camera, input: &mut InputState, dt_ms: f32) {
    let (dx, dy) = input.take_mouse_delta();
    camera.yaw_by(-(dx as f32) * LOOK_SENSITIVITY);
    camera.pitch_by(-(dy as f32) * LOOK_SENSITIVITY);

    let mut step = MOVE_SPEED * dt_ms;
    if input.is_held(KeyCode::ControlLeft) {
        step *= SLOW_FACTOR;
    }

    if input.is_held(KeyCode::KeyW) {
        camera.walk_forward(step);
    }
    if input.is_held(KeyCode::KeyS) {
        camera.walk_backwards(step);
    }
    if input.is_held(KeyCode::KeyA) {
        camera.strafe_left(step);
    }
    if input.is_held(KeyCode::KeyD) {
        camera.strafe_right(step);
    }
    if input.is_held(KeyCode::Space) {
        camera.fly_up(step);
    }
    if input.is_held(KeyCode::ShiftLeft) {
        camera.fly_down(step);
    }
}
