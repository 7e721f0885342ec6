//! Euler angle conventions for camera orientation.
//!
//! Angles are stored in degrees as `(pitch, yaw, roll)` in the `x`, `y` and
//! `z` components. Yaw rotates about world +Y, pitch about the local +X
//! axis, and the canonical forward axis is -Z.

use glam::{EulerRot, Quat, Vec3};

/// A camera pose given as an eye point, a look-at target and a vertical
/// field of view in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookAt {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

impl LookAt {
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self {
            position,
            target,
            fov,
        }
    }

    /// Build from the flat `[x, y, z]` arrays used by authored settings.
    pub fn from_arrays(position: [f32; 3], target: [f32; 3], fov: f32) -> Self {
        Self::new(Vec3::from_array(position), Vec3::from_array(target), fov)
    }
}

/// Convert a unit direction into Euler angles in degrees.
///
/// `pitch = asin(dir.y)`, `yaw = atan2(-dir.x, -dir.z)`, `roll = 0`.
pub fn vec_to_angles(dir: Vec3) -> Vec3 {
    Vec3::new(
        dir.y.clamp(-1.0, 1.0).asin().to_degrees(),
        (-dir.x).atan2(-dir.z).to_degrees(),
        0.0,
    )
}

/// Rotation for the given Euler angles in degrees.
pub fn rotation_from_angles(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Forward direction (-Z rotated by `angles`).
pub fn forward_from_angles(angles: Vec3) -> Vec3 {
    rotation_from_angles(angles) * Vec3::NEG_Z
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_zero_angles_look_down_negative_z() {
        assert_vec_near(forward_from_angles(Vec3::ZERO), Vec3::NEG_Z);
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let f = forward_from_angles(Vec3::new(0.0, 90.0, 0.0));
        assert_vec_near(f, Vec3::NEG_X);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let f = forward_from_angles(Vec3::new(90.0, 0.0, 0.0));
        assert_vec_near(f, Vec3::Y);
    }

    #[test]
    fn test_angles_round_trip_through_direction() {
        for &(pitch, yaw) in &[(10.0_f32, 20.0_f32), (-45.0, 170.0), (80.0, -95.0)] {
            let dir = forward_from_angles(Vec3::new(pitch, yaw, 0.0));
            let angles = vec_to_angles(dir);
            assert!((angles.x - pitch).abs() < 1e-3);
            assert!((angles.y - yaw).abs() < 1e-3);
            assert_eq!(angles.z, 0.0);
        }
    }

    #[test]
    fn test_vec_to_angles_tolerates_overshoot() {
        let angles = vec_to_angles(Vec3::new(0.0, 1.000_001, 0.0));
        assert!(angles.x.is_finite());
    }
}
