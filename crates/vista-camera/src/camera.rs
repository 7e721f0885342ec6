//! The camera pose value type.
//!
//! A [`Camera`] stores position, Euler angles and a focus distance. The focus
//! point is always derived from those three and never stored, so the fields
//! cannot drift out of agreement.

use glam::Vec3;
use vista_math::{BoundingBox, LookAt, forward_from_angles, vec_to_angles};

const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Position, orientation and focus distance, without field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Degrees, `(pitch, yaw, roll)`.
    pub angles: Vec3,
    pub distance: f32,
}

impl Pose {
    pub fn focus_point(&self) -> Vec3 {
        self.position + forward_from_angles(self.angles) * self.distance
    }
}

/// A full camera state. Copying is a plain `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Degrees, `(pitch, yaw, roll)`.
    pub angles: Vec3,
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angles: Vec3::ZERO,
            distance: 1.0,
            fov: 65.0,
        }
    }
}

impl Camera {
    /// A camera at `look.position` facing `look.target`.
    pub fn from_look_at(look: &LookAt) -> Self {
        let mut camera = Self {
            fov: look.fov,
            ..Default::default()
        };
        camera.look(look.position, look.target);
        camera
    }

    /// Place the camera at `from` looking at `to`. Roll is cleared.
    ///
    /// If the points coincide the orientation is left unchanged.
    pub fn look(&mut self, from: Vec3, to: Vec3) {
        self.position = from;
        let offset = to - from;
        self.distance = offset.length();
        if self.distance > DEGENERATE_DISTANCE {
            self.angles = vec_to_angles(offset / self.distance);
        }
    }

    pub fn focus_point(&self) -> Vec3 {
        self.pose().focus_point()
    }

    /// Blend by interpolating position and focus point, then re-deriving the
    /// orientation. Exact at `t = 0` and `t = 1` up to float precision.
    pub fn lerp(a: &Camera, b: &Camera, t: f32) -> Camera {
        let position = a.position.lerp(b.position, t);
        let offset = a.focus_point().lerp(b.focus_point(), t) - position;
        let distance = offset.length();
        let angles = if distance > DEGENERATE_DISTANCE {
            vec_to_angles(offset / distance)
        } else {
            a.angles.lerp(b.angles, t)
        };
        Camera {
            position,
            angles,
            distance,
            fov: a.fov + (b.fov - a.fov) * t,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            angles: self.angles,
            distance: self.distance,
        }
    }

    /// Take position, angles and distance from `pose`; fov is kept.
    pub fn set_pose(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.angles = pose.angles;
        self.distance = pose.distance;
    }

    /// Flattened `[position, angles, distance, fov]` for change detection.
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.angles.x,
            self.angles.y,
            self.angles.z,
            self.distance,
            self.fov,
        ]
    }
}

/// A camera that fits `bounds` in view from above and to the side.
pub fn frame_camera(bounds: &BoundingBox, fov: f32) -> Camera {
    let scene_size = bounds.radius();
    let distance = scene_size / (fov.to_radians() * 0.5).sin();
    let position = bounds.center + Vec3::new(2.0, 1.0, 2.0).normalize() * distance;
    Camera::from_look_at(&LookAt::new(position, bounds.center, fov))
}
