use crate::{Mat4, Vec3};

/// First-person camera: a position plus yaw/pitch in degrees (right-handed, Y up).
///
/// At yaw 0 the camera looks down -Z and +X is to its right. Positive yaw turns
/// counter-clockwise seen from above, positive pitch looks up. Neither angle is
/// normalised or clamped, so pitching past 90 degrees turns the view upside down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[inline]
    pub fn yaw_by(&mut self, degrees: f32) {
        self.yaw += degrees;
    }

    #[inline]
    pub fn pitch_by(&mut self, degrees: f32) {
        self.pitch += degrees;
    }

    /// Horizontal heading; pitch does not affect walking.
    #[inline]
    pub fn heading(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sin, 0.0, -cos)
    }

    /// Horizontal axis to the right of the heading.
    #[inline]
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos, 0.0, -sin)
    }

    /// Unit view direction including pitch; `look_through` maps it to -Z.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.to_radians().sin_cos();
        self.heading() * cos_p + Vec3::Y * sin_p
    }

    pub fn walk_forward(&mut self, distance: f32) {
        self.position += self.heading() * distance;
    }

    pub fn walk_backwards(&mut self, distance: f32) {
        self.position -= self.heading() * distance;
    }

    pub fn strafe_left(&mut self, distance: f32) {
        self.position -= self.right() * distance;
    }

    pub fn strafe_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    #[inline]
    pub fn fly_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    #[inline]
    pub fn fly_down(&mut self, distance: f32) {
        self.position.y -= distance;
    }

    /// View matrix: the world is rotated by -pitch about X and -yaw about Y, after
    /// being translated by -position.
    pub fn look_through(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.pitch.to_radians())
            * Mat4::from_rotation_y(-self.yaw.to_radians())
            * Mat4::from_translation(-self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Perspective projection (right-handed, depth in [0, 1]).
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn new(fov_y_deg: f32, z_near: f32, z_far: f32, aspect: f32) -> Self {
        Self {
            fov_y_deg,
            z_near,
            z_far,
            aspect,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    /// Recompute the aspect ratio for a new framebuffer size.
    #[inline]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}
