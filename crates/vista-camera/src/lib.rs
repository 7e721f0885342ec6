//! Camera pose algebra and the per-mode camera controllers.

pub mod anim;
pub mod camera;
pub mod controller;
pub mod integrator;

pub use anim::AnimController;
pub use camera::{Camera, Pose, frame_camera};
pub use controller::{CameraController, Controllers, FlyController, OrbitController};
pub use integrator::{FlyIntegrator, OrbitIntegrator, PoseIntegrator};
