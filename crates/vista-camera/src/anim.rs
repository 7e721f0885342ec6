use vista_animation::{AnimState, AnimTrack, SplineError};
use vista_input::InputFrame;

use crate::camera::Camera;
use crate::controller::CameraController;

/// Plays an authored camera path. Input is drained and ignored.
#[derive(Debug, Clone)]
pub struct AnimController {
    state: AnimState,
}

impl AnimController {
    pub fn new(track: &AnimTrack) -> Result<Self, SplineError> {
        let mut state = AnimState::from_track(track)?;
        state.update(0.0);
        tracing::debug!(
            name = %track.name,
            keys = track.key_count(),
            duration = state.cursor.duration(),
            "animation track loaded"
        );
        Ok(Self { state })
    }

    pub fn state(&self) -> &AnimState {
        &self.state
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f32 {
        self.state.cursor.duration()
    }

    /// Current playhead in seconds.
    pub fn time(&self) -> f32 {
        self.state.cursor.value()
    }

    /// Jump the playhead; the pose follows on the next update.
    pub fn seek(&mut self, time: f32) {
        self.state.cursor.set_value(time);
    }

    fn apply(&self, camera: &mut Camera) {
        camera.look(self.state.position, self.state.target);
        if let Some(fov) = self.state.fov {
            camera.fov = fov;
        }
    }
}

impl CameraController for AnimController {
    fn on_enter(&mut self, camera: &mut Camera) {
        self.apply(camera);
    }

    fn update(&mut self, dt: f32, frame: &mut InputFrame, camera: &mut Camera) {
        self.state.update(dt);
        self.apply(camera);
        frame.read();
    }

    fn on_exit(&mut self, _camera: &Camera) {}
}
