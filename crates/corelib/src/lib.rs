//! Core types: math re-exports, fly-through Camera and Projection.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;

#[cfg(test)]
mod tests {
    use super::*;
    use camera::{Camera, Projection};

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn walk_forward_moves_down_negative_z() {
        let mut cam = Camera::default();
        cam.walk_forward(1.0);
        assert_vec_eq(cam.position, vec3(0.0, 0.0, -1.0));
        assert!((cam.position.length() - 1.0).abs() < EPS);

        cam.walk_backwards(3.0);
        assert_vec_eq(cam.position, vec3(0.0, 0.0, 2.0));
    }

    #[test]
    fn yaw_rotates_forward_onto_strafe_axis() {
        let mut strafer = Camera::default();
        strafer.strafe_left(1.0);

        let mut cam = Camera::default();
        cam.yaw_by(90.0);
        cam.walk_forward(1.0);

        assert_vec_eq(cam.position, vec3(-1.0, 0.0, 0.0));
        assert_vec_eq(cam.position, strafer.position);
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let mut cam = Camera::default();
        cam.yaw_by(30.0);
        assert!(cam.heading().dot(cam.right()).abs() < EPS);

        cam.strafe_right(2.0);
        cam.strafe_left(0.5);
        assert_vec_eq(cam.position, cam.right() * 1.5);
        assert_eq!(cam.position.y, 0.0);
    }

    #[test]
    fn walking_ignores_pitch() {
        let mut cam = Camera::default();
        cam.pitch_by(60.0);
        cam.walk_forward(2.0);
        assert_vec_eq(cam.position, vec3(0.0, 0.0, -2.0));
    }

    #[test]
    fn fly_changes_only_height() {
        let mut cam = Camera::new(vec3(1.0, 2.0, 3.0));
        cam.yaw_by(45.0);
        cam.pitch_by(-10.0);
        cam.fly_up(5.0);
        assert_vec_eq(cam.position, vec3(1.0, 7.0, 3.0));
        assert_eq!(cam.yaw, 45.0);
        assert_eq!(cam.pitch, -10.0);

        cam.fly_down(2.0);
        assert_vec_eq(cam.position, vec3(1.0, 5.0, 3.0));
    }

    #[test]
    fn angles_accumulate_without_clamping() {
        let mut cam = Camera::default();
        for _ in 0..4 {
            cam.yaw_by(120.0);
            cam.pitch_by(50.0);
        }
        assert_eq!(cam.yaw, 480.0);
        assert_eq!(cam.pitch, 200.0);
    }

    #[test]
    fn view_maps_eye_to_origin_and_look_to_negative_z() {
        let mut cam = Camera::new(vec3(3.0, -1.0, 4.0));
        cam.yaw_by(37.0);
        cam.pitch_by(-20.0);
        let view = cam.look_through();

        assert_vec_eq(view.transform_point3(cam.position), Vec3::ZERO);
        let ahead = cam.position + cam.look_direction();
        assert_vec_eq(view.transform_point3(ahead), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn view_applies_rotation_after_translation() {
        let mut cam = Camera::new(vec3(0.0, 0.0, 5.0));
        cam.yaw_by(90.0);
        let expected = Mat4::from_rotation_y(-90f32.to_radians())
            * Mat4::from_translation(vec3(0.0, 0.0, -5.0));
        assert!(cam.look_through().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = Camera::new(vec3(0.0, 0.0, 4.0));
        let mut proj = Projection::new(65.0, 0.001, 100.0, 1.0);
        proj.resize(1280, 720);
        assert!((proj.aspect - 16.0 / 9.0).abs() < EPS);

        let pv = proj.matrix() * cam.look_through();
        assert!(pv.to_cols_array().iter().all(|f| f.is_finite()));
    }
}
