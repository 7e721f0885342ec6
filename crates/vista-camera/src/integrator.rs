//! Damped pose integrators.
//!
//! An integrator turns drained [`InputFrame`] deltas into a smoothed pose.
//! Each keeps a target pose that input moves instantly and a current pose
//! that chases it with frame-rate independent exponential damping.

use glam::Vec3;
use vista_config::CameraConfig;
use vista_input::InputFrame;
use vista_math::{damp, forward_from_angles, rotation_from_angles};

use crate::camera::Pose;

/// Produces a damped camera pose from per-frame input.
pub trait PoseIntegrator {
    /// Seed the integrator from `pose`. With `snap` the current pose jumps
    /// there immediately; otherwise it glides over the next updates.
    fn attach(&mut self, pose: &Pose, snap: bool);

    /// The owning controller stopped driving this integrator.
    fn detach(&mut self) {}

    /// Drain `frame` and advance by `dt` seconds.
    fn update(&mut self, frame: &mut InputFrame, dt: f32) -> Pose;
}

#[derive(Debug, Clone, Copy)]
struct Damping {
    rotate: f32,
    movement: f32,
    zoom: f32,
}

impl Damping {
    fn from_config(config: &CameraConfig) -> Self {
        Self {
            rotate: config.rotate_damping,
            movement: config.move_damping,
            zoom: config.zoom_damping,
        }
    }
}

/// Apply a rotate delta: horizontal drag turns yaw, vertical drag pitch.
fn turn(angles: Vec3, rotate: Vec3, pitch_range: (f32, f32)) -> Vec3 {
    Vec3::new(
        (angles.x - rotate.y).clamp(pitch_range.0, pitch_range.1),
        angles.y - rotate.x,
        angles.z,
    )
}

/// Orbits a focus point. Move x/y pans the focus in the view plane and move
/// z scales the focus distance (positive zooms out).
#[derive(Debug, Clone)]
pub struct OrbitIntegrator {
    damping: Damping,
    pitch_range: (f32, f32),
    zoom_min: f32,
    target_focus: Vec3,
    target_angles: Vec3,
    target_distance: f32,
    focus: Vec3,
    angles: Vec3,
    distance: f32,
}

impl OrbitIntegrator {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            damping: Damping::from_config(config),
            pitch_range: (config.pitch_min, config.pitch_max),
            zoom_min: config.zoom_min,
            target_focus: Vec3::ZERO,
            target_angles: Vec3::ZERO,
            target_distance: 1.0,
            focus: Vec3::ZERO,
            angles: Vec3::ZERO,
            distance: 1.0,
        }
    }

    fn pose(&self) -> Pose {
        Pose {
            position: self.focus - forward_from_angles(self.angles) * self.distance,
            angles: self.angles,
            distance: self.distance,
        }
    }
}

impl PoseIntegrator for OrbitIntegrator {
    fn attach(&mut self, pose: &Pose, snap: bool) {
        self.target_focus = pose.focus_point();
        self.target_angles = turn(pose.angles, Vec3::ZERO, self.pitch_range);
        self.target_distance = pose.distance.max(self.zoom_min);
        if snap {
            self.focus = self.target_focus;
            self.angles = self.target_angles;
            self.distance = self.target_distance;
        }
    }

    fn update(&mut self, frame: &mut InputFrame, dt: f32) -> Pose {
        let deltas = frame.read();
        let pan = rotation_from_angles(self.angles) * deltas.movement.with_z(0.0);
        self.target_focus += pan;
        self.target_angles = turn(self.target_angles, deltas.rotate, self.pitch_range);
        self.target_distance =
            (self.target_distance * (1.0 + deltas.movement.z)).max(self.zoom_min);

        self.focus = self
            .focus
            .lerp(self.target_focus, damp(self.damping.movement, dt));
        self.angles = self
            .angles
            .lerp(self.target_angles, damp(self.damping.rotate, dt));
        self.distance +=
            (self.target_distance - self.distance) * damp(self.damping.zoom, dt);
        self.pose()
    }
}

/// First-person flight. Move is local (x right, y up, z forward).
#[derive(Debug, Clone)]
pub struct FlyIntegrator {
    damping: Damping,
    pitch_range: (f32, f32),
    target_position: Vec3,
    target_angles: Vec3,
    position: Vec3,
    angles: Vec3,
    distance: f32,
}

impl FlyIntegrator {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            damping: Damping::from_config(config),
            pitch_range: (config.pitch_min, config.pitch_max),
            target_position: Vec3::ZERO,
            target_angles: Vec3::ZERO,
            position: Vec3::ZERO,
            angles: Vec3::ZERO,
            distance: 1.0,
        }
    }
}

impl PoseIntegrator for FlyIntegrator {
    fn attach(&mut self, pose: &Pose, snap: bool) {
        self.target_position = pose.position;
        self.target_angles = turn(pose.angles, Vec3::ZERO, self.pitch_range);
        self.distance = pose.distance;
        if snap {
            self.position = self.target_position;
            self.angles = self.target_angles;
        }
    }

    fn update(&mut self, frame: &mut InputFrame, dt: f32) -> Pose {
        let deltas = frame.read();
        let m = deltas.movement;
        self.target_position += rotation_from_angles(self.angles) * Vec3::new(m.x, m.y, -m.z);
        self.target_angles = turn(self.target_angles, deltas.rotate, self.pitch_range);

        self.position = self
            .position
            .lerp(self.target_position, damp(self.damping.movement, dt));
        self.angles = self
            .angles
            .lerp(self.target_angles, damp(self.damping.rotate, dt));
        Pose {
            position: self.position,
            angles: self.angles,
            distance: self.distance,
        }
    }
}
