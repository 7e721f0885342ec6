//! Camera mode state machine with blended transitions.
//!
//! Three cameras are live: the displayed camera, the `target` the active
//! controller writes into, and `from`, a snapshot of the displayed camera
//! taken when the last transition began. While the transition timer runs the
//! displayed camera eases from `from` to `target`; afterwards it is exactly
//! `target`.

use tracing::{debug, info, warn};
use vista_animation::{AnimTrack, create_rotate_track};
use vista_camera::{AnimController, Camera, CameraController, Controllers, frame_camera};
use vista_config::{CameraConfig, ExperienceSettings, StartMode};
use vista_input::InputFrame;
use vista_math::{BoundingBox, EasingFunction, LookAt};
use vista_state::{CameraMode, Command, ViewerState};

use crate::error::ViewerError;

/// Keys and length of the synthesized turntable animation.
const ROTATE_TRACK_KEYS: usize = 12;
const ROTATE_TRACK_DURATION: f32 = 20.0;

pub struct CameraManager {
    camera: Camera,
    target: Camera,
    from: Camera,
    /// Mode whose controller is currently entered.
    active_mode: CameraMode,
    /// Mode to return to when leaving the animation.
    from_mode: CameraMode,
    controllers: Controllers,
    frame_camera: Camera,
    reset_camera: Camera,
    transition_speed: f32,
    transition_timer: f32,
    easing: EasingFunction,
}

impl CameraManager {
    /// Build the controllers for a scene and pick the starting mode.
    ///
    /// A scene whose initial camera lies outside `bounds` is an object
    /// experience: it starts in orbit and, without an authored start track,
    /// gets a turntable animation.
    pub fn new(
        settings: &ExperienceSettings,
        bounds: &BoundingBox,
        config: &CameraConfig,
        state: &mut ViewerState,
    ) -> Result<Self, ViewerError> {
        let initial = settings.initial_camera()?;
        let frame_camera = frame_camera(bounds, initial.fov);
        let reset_camera = Camera::from_look_at(&LookAt::from_arrays(
            initial.position,
            initial.target,
            initial.fov,
        ));

        let object_experience = !bounds.contains_point(reset_camera.position);
        let seed = if settings.has_start_pose {
            &reset_camera
        } else {
            &frame_camera
        };
        let anim = start_track(settings, seed, object_experience).and_then(|track| {
            AnimController::new(&track)
                .inspect_err(|err| {
                    warn!(track = %track.name, %err, "start track unusable, skipping animation");
                })
                .ok()
        });

        state.set_has_animation(anim.is_some());
        state.set_animation_duration(anim.as_ref().map_or(0.0, |a| a.duration()));

        let free_mode = if object_experience {
            CameraMode::Orbit
        } else {
            CameraMode::Fly
        };
        let initial_mode = if anim.is_some() {
            CameraMode::Anim
        } else {
            free_mode
        };
        state.set_camera_mode(initial_mode);
        info!(?initial_mode, object_experience, "camera manager ready");

        let mut manager = Self {
            camera: reset_camera,
            target: reset_camera,
            from: reset_camera,
            active_mode: initial_mode,
            from_mode: free_mode,
            controllers: Controllers::new(config, anim),
            frame_camera,
            reset_camera,
            transition_speed: config.transition_speed,
            transition_timer: 1.0,
            easing: config.transition_easing,
        };
        if let Some(controller) = manager.controllers.get_mut(initial_mode) {
            controller.on_enter(&mut manager.camera);
        }
        Ok(manager)
    }

    /// The displayed camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn target(&self) -> &Camera {
        &self.target
    }

    pub fn reset_camera(&self) -> &Camera {
        &self.reset_camera
    }

    pub fn frame_camera(&self) -> &Camera {
        &self.frame_camera
    }

    pub fn transition_timer(&self) -> f32 {
        self.transition_timer
    }

    pub fn active_mode(&self) -> CameraMode {
        self.active_mode
    }

    pub fn from_mode(&self) -> CameraMode {
        self.from_mode
    }

    pub fn controllers_mut(&mut self) -> &mut Controllers {
        &mut self.controllers
    }

    /// Advance one frame: follow any mode change, run the active controller
    /// and blend the displayed camera.
    pub fn update(&mut self, dt: f32, frame: &mut InputFrame, state: &mut ViewerState) {
        self.sync_mode(state);

        let mode = self.active_mode;
        let controller_dt = if mode == CameraMode::Anim && state.animation_paused() {
            0.0
        } else {
            dt
        };
        self.transition_timer = (self.transition_timer + dt * self.transition_speed).min(1.0);

        match self.controllers.get_mut(mode) {
            Some(controller) => controller.update(controller_dt, frame, &mut self.target),
            None => {
                frame.read();
            }
        }

        self.camera = if self.transition_timer < 1.0 {
            Camera::lerp(
                &self.from,
                &self.target,
                self.easing.apply(self.transition_timer),
            )
        } else {
            self.target
        };

        if mode == CameraMode::Anim
            && let Some(anim) = self.controllers.anim.as_ref()
        {
            state.set_animation_time(anim.time());
        }
    }

    pub fn handle_command(&mut self, command: Command, state: &mut ViewerState) {
        debug!(?command, "camera command");
        match command {
            Command::Frame => self.goto_orbit(self.frame_camera, state),
            Command::Reset => self.goto_orbit(self.reset_camera, state),
            Command::PlayPause => {
                if !state.has_animation() {
                    return;
                }
                if state.camera_mode() == CameraMode::Anim {
                    state.set_animation_paused(!state.animation_paused());
                } else {
                    self.switch_mode(CameraMode::Anim, state);
                    state.set_animation_paused(false);
                }
            }
            Command::Cancel | Command::Interrupt => {
                if state.camera_mode() == CameraMode::Anim {
                    self.switch_mode(self.from_mode, state);
                }
            }
            Command::ScrubAnim(time) => {
                if self.controllers.anim.is_none() {
                    warn!(time, "scrub ignored, scene has no animation");
                    return;
                }
                self.switch_mode(CameraMode::Anim, state);
                if let Some(anim) = self.controllers.anim.as_mut() {
                    anim.seek(time);
                }
            }
            Command::Pick(point) => {
                let mut camera = self.camera;
                camera.look(self.camera.position, point);
                self.goto_orbit(camera, state);
            }
            Command::ActivateAnnotation(look) => {
                self.goto_orbit(Camera::from_look_at(&look), state);
            }
            Command::Interact => {}
        }
    }

    fn switch_mode(&mut self, mode: CameraMode, state: &mut ViewerState) {
        state.set_camera_mode(mode);
        self.sync_mode(state);
    }

    /// Orbit to `camera`, blending from whatever is displayed now.
    fn goto_orbit(&mut self, camera: Camera, state: &mut ViewerState) {
        self.switch_mode(CameraMode::Orbit, state);
        self.controllers.orbit.goto(&camera);
        self.start_transition();
    }

    fn start_transition(&mut self) {
        self.target = self.camera;
        self.from = self.camera;
        self.transition_timer = 0.0;
    }

    /// Bring the entered controller in line with the requested mode: exit
    /// the old one, enter the new one and restart the blend.
    fn sync_mode(&mut self, state: &mut ViewerState) {
        let requested = state.camera_mode();
        if requested == self.active_mode {
            return;
        }
        if !self.controllers.has(requested) {
            warn!(?requested, "no controller for camera mode, staying in {:?}", self.active_mode);
            state.set_camera_mode(self.active_mode);
            return;
        }

        let prev = self.active_mode;
        self.start_transition();
        self.from_mode = prev;
        if let Some(controller) = self.controllers.get_mut(prev) {
            controller.on_exit(&self.camera);
        }
        self.active_mode = requested;
        if let Some(controller) = self.controllers.get_mut(requested) {
            controller.on_enter(&mut self.camera);
        }
        info!(?prev, mode = ?requested, "camera mode switched");
    }
}

/// The track played at startup, if any.
fn start_track(
    settings: &ExperienceSettings,
    seed: &Camera,
    object_experience: bool,
) -> Option<AnimTrack> {
    if settings.start_mode == StartMode::AnimTrack
        && let Some(track) = settings.anim_tracks.first()
    {
        return Some(track.clone());
    }
    if object_experience {
        return Some(create_rotate_track(
            seed.position,
            seed.focus_point(),
            seed.fov,
            ROTATE_TRACK_KEYS,
            ROTATE_TRACK_DURATION,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vista_math::nearly_equals;

    fn inside_scene() -> (ExperienceSettings, BoundingBox) {
        // Default camera at (0, 0, 5) sits inside a box of half size 10.
        (
            ExperienceSettings::default(),
            BoundingBox::new(Vec3::ZERO, Vec3::splat(10.0)),
        )
    }

    fn object_scene() -> (ExperienceSettings, BoundingBox) {
        (
            ExperienceSettings::default(),
            BoundingBox::new(Vec3::ZERO, Vec3::ONE),
        )
    }

    fn build(scene: (ExperienceSettings, BoundingBox)) -> (CameraManager, ViewerState) {
        let mut state = ViewerState::default();
        let manager =
            CameraManager::new(&scene.0, &scene.1, &CameraConfig::default(), &mut state).unwrap();
        (manager, state)
    }

    #[test]
    fn test_inside_camera_starts_in_fly_without_animation() {
        let (manager, state) = build(inside_scene());
        assert_eq!(state.camera_mode(), CameraMode::Fly);
        assert_eq!(manager.active_mode(), CameraMode::Fly);
        assert!(!state.has_animation());
        assert_eq!(state.animation_duration(), 0.0);
    }

    #[test]
    fn test_object_experience_gets_turntable() {
        let (manager, state) = build(object_scene());
        assert_eq!(state.camera_mode(), CameraMode::Anim);
        assert!(state.has_animation());
        assert_eq!(state.animation_duration(), ROTATE_TRACK_DURATION);
        assert_eq!(manager.from_mode(), CameraMode::Orbit);
    }

    #[test]
    fn test_authored_start_track_is_used() {
        let (mut settings, bounds) = inside_scene();
        let mut track = create_rotate_track(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0, 4, 8.0);
        track.name = "authored".into();
        settings.anim_tracks.push(track);
        settings.start_mode = StartMode::AnimTrack;
        let (_manager, state) = build((settings, bounds));
        assert_eq!(state.camera_mode(), CameraMode::Anim);
        assert_eq!(state.animation_duration(), 8.0);
    }

    #[test]
    fn test_unusable_start_track_falls_back_to_free_mode() {
        let (mut settings, bounds) = inside_scene();
        let mut track = create_rotate_track(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0, 4, 8.0);
        track.keyframes.times.clear();
        settings.anim_tracks.push(track);
        settings.start_mode = StartMode::AnimTrack;
        let (manager, state) = build((settings, bounds));
        assert_eq!(manager.active_mode(), CameraMode::Fly);
        assert!(!state.has_animation());
        assert_eq!(state.animation_duration(), 0.0);
    }

    #[test]
    fn test_missing_camera_is_an_error() {
        let (mut settings, bounds) = inside_scene();
        settings.cameras.clear();
        let mut state = ViewerState::default();
        let result = CameraManager::new(&settings, &bounds, &CameraConfig::default(), &mut state);
        assert!(matches!(result, Err(ViewerError::Settings(_))));
    }

    #[test]
    fn test_play_pause_toggles_and_enters_anim() {
        let (mut manager, mut state) = build(object_scene());
        manager.handle_command(Command::Cancel, &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Orbit);

        manager.handle_command(Command::PlayPause, &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Anim);
        assert!(!state.animation_paused());

        manager.handle_command(Command::PlayPause, &mut state);
        assert!(state.animation_paused());
        assert_eq!(state.camera_mode(), CameraMode::Anim);
    }

    #[test]
    fn test_play_pause_without_animation_is_ignored() {
        let (mut manager, mut state) = build(inside_scene());
        manager.handle_command(Command::PlayPause, &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Fly);
    }

    #[test]
    fn test_interrupt_only_leaves_anim() {
        let (mut manager, mut state) = build(inside_scene());
        manager.handle_command(Command::Interrupt, &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Fly);
    }

    #[test]
    fn test_transition_uses_configured_easing() {
        let (settings, bounds) = inside_scene();
        let config = CameraConfig {
            transition_easing: EasingFunction::Linear,
            ..CameraConfig::default()
        };
        let mut state = ViewerState::default();
        let mut manager = CameraManager::new(&settings, &bounds, &config, &mut state).unwrap();
        let mut frame = InputFrame::new();

        manager.handle_command(Command::Frame, &mut state);
        let from = *manager.camera();
        manager.update(0.25, &mut frame, &mut state);

        assert_eq!(manager.transition_timer(), 0.5);
        let expected = Camera::lerp(&from, manager.target(), 0.5);
        assert!(nearly_equals(
            &manager.camera().to_array(),
            &expected.to_array(),
            1e-4
        ));
    }

    #[test]
    fn test_paused_animation_freezes() {
        let (mut manager, mut state) = build(object_scene());
        let mut frame = InputFrame::new();
        manager.update(1.0, &mut frame, &mut state);
        assert_eq!(state.animation_time(), 0.0);

        state.set_animation_paused(false);
        manager.update(1.0, &mut frame, &mut state);
        assert!((state.animation_time() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scrub_enters_anim_and_seeks() {
        let (mut manager, mut state) = build(object_scene());
        manager.handle_command(Command::Reset, &mut state);
        manager.handle_command(Command::ScrubAnim(7.5), &mut state);
        assert_eq!(manager.active_mode(), CameraMode::Anim);
        manager.update(0.0, &mut InputFrame::new(), &mut state);
        assert!((state.animation_time() - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_scrub_without_animation_is_ignored() {
        let (mut manager, mut state) = build(inside_scene());
        manager.handle_command(Command::ScrubAnim(1.0), &mut state);
        assert_eq!(manager.active_mode(), CameraMode::Fly);
    }

    #[test]
    fn test_requesting_anim_without_track_is_reverted() {
        let (mut manager, mut state) = build(inside_scene());
        state.set_camera_mode(CameraMode::Anim);
        manager.update(0.016, &mut InputFrame::new(), &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Fly);
        assert_eq!(manager.active_mode(), CameraMode::Fly);
    }

    #[test]
    fn test_annotation_orbits_to_its_pose() {
        let (mut manager, mut state) = build(inside_scene());
        let look = LookAt::new(Vec3::new(2.0, 1.0, 2.0), Vec3::new(0.0, 1.0, 0.0), 45.0);
        manager.handle_command(Command::ActivateAnnotation(look), &mut state);
        assert_eq!(state.camera_mode(), CameraMode::Orbit);
        let mut frame = InputFrame::new();
        for _ in 0..60 {
            manager.update(1.0 / 60.0, &mut frame, &mut state);
        }
        let camera = manager.camera();
        assert!((camera.position - look.position).length() < 1e-3);
        assert!((camera.focus_point() - look.target).length() < 1e-3);
        assert_eq!(camera.fov, 45.0);
    }
}
