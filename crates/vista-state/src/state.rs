//! The observable viewer state.

use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec2;

use crate::mode::{CameraMode, InputMode};

/// Outbound notification, published when a [`ViewerState`] field changes or
/// when a transient event (such as a joystick update) occurs.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    ReadyToRender(bool),
    Progress(u8),
    InputMode { value: InputMode, prev: InputMode },
    CameraMode { value: CameraMode, prev: CameraMode },
    HasAnimation(bool),
    AnimationDuration(f32),
    AnimationTime(f32),
    AnimationPaused(bool),
    ControlsHidden(bool),
    /// Virtual joystick geometry in screen pixels; both `None` on release.
    TouchJoystick { base: Option<Vec2>, stick: Option<Vec2> },
}

/// Closed set of viewer fields. Setters publish only on an actual change.
#[derive(Debug)]
pub struct ViewerState {
    ready_to_render: bool,
    progress: u8,
    input_mode: InputMode,
    camera_mode: CameraMode,
    has_animation: bool,
    animation_duration: f32,
    animation_time: f32,
    animation_paused: bool,
    controls_hidden: bool,
    subscribers: Vec<Sender<StateChange>>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            ready_to_render: false,
            progress: 0,
            input_mode: InputMode::Desktop,
            camera_mode: CameraMode::Orbit,
            has_animation: false,
            animation_duration: 0.0,
            animation_time: 0.0,
            animation_paused: true,
            controls_hidden: false,
            subscribers: Vec::new(),
        }
    }
}

impl ViewerState {
    pub fn new(camera_mode: CameraMode) -> Self {
        Self {
            camera_mode,
            ..Default::default()
        }
    }

    /// Register a listener. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send a change to every live subscriber, pruning disconnected ones.
    pub fn publish(&mut self, change: StateChange) {
        tracing::trace!(?change, "state change");
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn publish_touch_joystick(&mut self, base: Option<Vec2>, stick: Option<Vec2>) {
        self.publish(StateChange::TouchJoystick { base, stick });
    }

    pub fn ready_to_render(&self) -> bool {
        self.ready_to_render
    }

    pub fn set_ready_to_render(&mut self, value: bool) {
        if self.ready_to_render != value {
            self.ready_to_render = value;
            self.publish(StateChange::ReadyToRender(value));
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Loading progress as a percentage, clamped to 100.
    pub fn set_progress(&mut self, value: u8) {
        let value = value.min(100);
        if self.progress != value {
            self.progress = value;
            self.publish(StateChange::Progress(value));
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, value: InputMode) {
        if self.input_mode != value {
            let prev = std::mem::replace(&mut self.input_mode, value);
            self.publish(StateChange::InputMode { value, prev });
        }
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    pub fn set_camera_mode(&mut self, value: CameraMode) {
        if self.camera_mode != value {
            let prev = std::mem::replace(&mut self.camera_mode, value);
            tracing::debug!(?prev, ?value, "camera mode changed");
            self.publish(StateChange::CameraMode { value, prev });
        }
    }

    pub fn has_animation(&self) -> bool {
        self.has_animation
    }

    pub fn set_has_animation(&mut self, value: bool) {
        if self.has_animation != value {
            self.has_animation = value;
            self.publish(StateChange::HasAnimation(value));
        }
    }

    pub fn animation_duration(&self) -> f32 {
        self.animation_duration
    }

    pub fn set_animation_duration(&mut self, value: f32) {
        if self.animation_duration != value {
            self.animation_duration = value;
            self.publish(StateChange::AnimationDuration(value));
        }
    }

    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    pub fn set_animation_time(&mut self, value: f32) {
        if self.animation_time != value {
            self.animation_time = value;
            self.publish(StateChange::AnimationTime(value));
        }
    }

    pub fn animation_paused(&self) -> bool {
        self.animation_paused
    }

    pub fn set_animation_paused(&mut self, value: bool) {
        if self.animation_paused != value {
            self.animation_paused = value;
            self.publish(StateChange::AnimationPaused(value));
        }
    }

    pub fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    pub fn set_controls_hidden(&mut self, value: bool) {
        if self.controls_hidden != value {
            self.controls_hidden = value;
            self.publish(StateChange::ControlsHidden(value));
        }
    }
}
