//! Per-mode camera controllers and the closed dispatch over them.

use vista_config::CameraConfig;
use vista_input::InputFrame;
use vista_state::CameraMode;

use crate::anim::AnimController;
use crate::camera::Camera;
use crate::integrator::{FlyIntegrator, OrbitIntegrator, PoseIntegrator};

/// The contract every camera mode satisfies.
pub trait CameraController {
    /// Becoming active. `camera` is the currently displayed camera.
    fn on_enter(&mut self, camera: &mut Camera);

    /// Drain `frame` and write this mode's pose into `camera`.
    fn update(&mut self, dt: f32, frame: &mut InputFrame, camera: &mut Camera);

    fn on_exit(&mut self, camera: &Camera);
}

/// Adapter from a [`PoseIntegrator`] to a controller, shared by orbit and fly.
struct IntegratorDriver {
    integrator: Box<dyn PoseIntegrator>,
    /// Field of view requested by the last `goto`, applied on next update.
    pending_fov: Option<f32>,
}

impl IntegratorDriver {
    fn new(integrator: Box<dyn PoseIntegrator>) -> Self {
        Self {
            integrator,
            pending_fov: None,
        }
    }

    fn goto(&mut self, camera: &Camera) {
        self.integrator.attach(&camera.pose(), true);
        self.pending_fov = Some(camera.fov);
    }

    fn on_enter(&mut self, camera: &Camera) {
        self.integrator.attach(&camera.pose(), true);
    }

    fn update(&mut self, dt: f32, frame: &mut InputFrame, camera: &mut Camera) {
        let pose = self.integrator.update(frame, dt);
        camera.set_pose(&pose);
        if let Some(fov) = self.pending_fov.take() {
            camera.fov = fov;
        }
    }

    fn on_exit(&mut self) {
        self.pending_fov = None;
        self.integrator.detach();
    }
}

macro_rules! integrator_controller {
    ($name:ident, $integrator:ident, $doc:literal) => {
        #[doc = $doc]
        pub struct $name {
            driver: IntegratorDriver,
        }

        impl $name {
            pub fn new(config: &CameraConfig) -> Self {
                Self::with_integrator(Box::new($integrator::new(config)))
            }

            pub fn with_integrator(integrator: Box<dyn PoseIntegrator>) -> Self {
                Self {
                    driver: IntegratorDriver::new(integrator),
                }
            }

            /// Hard cut the integrator to `camera`, including its fov.
            pub fn goto(&mut self, camera: &Camera) {
                self.driver.goto(camera);
            }
        }

        impl CameraController for $name {
            fn on_enter(&mut self, camera: &mut Camera) {
                self.driver.on_enter(camera);
            }

            fn update(&mut self, dt: f32, frame: &mut InputFrame, camera: &mut Camera) {
                self.driver.update(dt, frame, camera);
            }

            fn on_exit(&mut self, _camera: &Camera) {
                self.driver.on_exit();
            }
        }
    };
}

integrator_controller!(OrbitController, OrbitIntegrator, "Orbits a focus point.");
integrator_controller!(FlyController, FlyIntegrator, "First-person free flight.");

/// One controller per [`CameraMode`]. The anim slot is empty when the scene
/// has no animation.
pub struct Controllers {
    pub orbit: OrbitController,
    pub fly: FlyController,
    pub anim: Option<AnimController>,
}

impl Controllers {
    pub fn new(config: &CameraConfig, anim: Option<AnimController>) -> Self {
        Self {
            orbit: OrbitController::new(config),
            fly: FlyController::new(config),
            anim,
        }
    }

    /// The controller for `mode`, or `None` for anim without an animation.
    pub fn get_mut(&mut self, mode: CameraMode) -> Option<&mut dyn CameraController> {
        match mode {
            CameraMode::Orbit => Some(&mut self.orbit),
            CameraMode::Fly => Some(&mut self.fly),
            CameraMode::Anim => self
                .anim
                .as_mut()
                .map(|anim| anim as &mut dyn CameraController),
        }
    }

    pub fn has(&self, mode: CameraMode) -> bool {
        mode != CameraMode::Anim || self.anim.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vista_math::LookAt;

    #[test]
    fn test_goto_applies_pose_and_fov() {
        let mut orbit = OrbitController::new(&CameraConfig::default());
        let mut camera = Camera::default();
        orbit.on_enter(&mut camera);

        let dest = Camera::from_look_at(&LookAt::new(Vec3::new(3.0, 1.0, 0.0), Vec3::ZERO, 40.0));
        orbit.goto(&dest);
        orbit.update(1.0 / 60.0, &mut InputFrame::new(), &mut camera);
        assert!((camera.position - dest.position).length() < 1e-4);
        assert!((camera.angles - dest.angles).length() < 1e-3);
        assert_eq!(camera.fov, 40.0);
    }

    #[test]
    fn test_enter_keeps_current_pose() {
        let mut fly = FlyController::new(&CameraConfig::default());
        let mut camera =
            Camera::from_look_at(&LookAt::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 70.0));
        let before = camera;
        fly.on_enter(&mut camera);
        fly.update(1.0 / 60.0, &mut InputFrame::new(), &mut camera);
        assert!((camera.position - before.position).length() < 1e-5);
        assert_eq!(camera.fov, 70.0);
    }

    #[test]
    fn test_missing_anim_slot() {
        let mut controllers = Controllers::new(&CameraConfig::default(), None);
        assert!(controllers.get_mut(CameraMode::Anim).is_none());
        assert!(!controllers.has(CameraMode::Anim));
        assert!(controllers.get_mut(CameraMode::Orbit).is_some());
    }
}
