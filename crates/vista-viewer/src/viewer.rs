//! Per-frame driver that turns input, commands and camera state into what
//! the renderer needs.
//!
//! Nothing moves until scene bounds arrive: the camera manager is built from
//! them. After that, each [`Viewer::update`] runs input aggregation, applies
//! queued commands, steps the camera manager and fits clip planes to the
//! scene. A render is requested only when the camera actually changed, and
//! never before the host signals readiness.

use std::time::Instant;

use crossbeam_channel::Receiver;
use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};
use vista_config::{Config, ExperienceSettings};
use vista_input::{GamepadSource, InputController, Picker, Viewport};
use vista_math::{BoundingBox, LookAt, forward_from_angles, nearly_equals};
use vista_state::{Command, CommandQueue, CommandSender, StateChange, ViewerState};
use winit::event::{ElementState, MouseButton, TouchPhase};

use crate::error::ViewerError;
use crate::manager::CameraManager;

/// Per-component tolerance below which the camera is considered unchanged.
const CHANGE_EPSILON: f32 = 1e-4;
/// Ratio bounding near against far to keep depth precision usable.
const MAX_DEPTH_RATIO: f32 = 16384.0;
const MIN_FAR: f32 = 0.01;

/// Camera parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    pub position: Vec3,
    /// Euler angles in degrees (pitch, yaw, roll).
    pub angles: Vec3,
    /// Field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Apply `fov` horizontally (landscape viewports).
    pub horizontal_fov: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub camera: RenderCamera,
    /// Whether the renderer should draw this frame.
    pub render: bool,
}

pub struct Viewer {
    config: Config,
    settings: ExperienceSettings,
    state: ViewerState,
    commands: CommandQueue,
    input: InputController,
    manager: Option<CameraManager>,
    bounds: BoundingBox,
    last_rendered: Option<[f32; 8]>,
    force_render: bool,
}

impl Viewer {
    pub fn new(config: Config, settings: ExperienceSettings, gamepad: GamepadSource) -> Self {
        let commands = CommandQueue::new();
        let viewport = Viewport::new(config.window.width as f32, config.window.height as f32);
        let input = InputController::new(&config.input, viewport, gamepad, commands.sender());
        Self {
            config,
            settings,
            state: ViewerState::default(),
            commands,
            input,
            manager: None,
            bounds: BoundingBox::default(),
            last_rendered: None,
            force_render: false,
        }
    }

    /// Scene bounds are known: build the camera manager.
    ///
    /// Fails when the settings cannot produce a camera; the viewer then stays
    /// idle. An unusable start track only drops the animation.
    pub fn set_scene_bounds(&mut self, bounds: BoundingBox) -> Result<(), ViewerError> {
        let manager = CameraManager::new(
            &self.settings,
            &bounds,
            &self.config.camera,
            &mut self.state,
        )?;
        info!(
            center = ?bounds.center,
            radius = bounds.radius(),
            mode = ?manager.active_mode(),
            "scene bounds set"
        );
        self.bounds = bounds;
        self.manager = Some(manager);
        self.last_rendered = None;
        Ok(())
    }

    pub fn set_ready_to_render(&mut self, ready: bool) {
        self.state.set_ready_to_render(ready);
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.state.set_progress(percent);
    }

    /// The first frame was presented: start playback unless disabled.
    pub fn first_frame(&mut self) {
        self.state.set_animation_paused(self.config.playback.noanim);
    }

    /// Request a render on the next update even if nothing moved.
    pub fn set_force_render(&mut self) {
        self.force_render = true;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.input.resize(Viewport::new(width as f32, height as f32));
        self.force_render = true;
    }

    pub fn set_picker(&mut self, picker: Box<dyn Picker>) {
        self.input.set_picker(picker);
    }

    /// Queue an orbit to the authored pose of annotation `index`. Returns
    /// `false` when the scene has no such annotation.
    pub fn activate_annotation(&mut self, index: usize) -> bool {
        let Some(annotation) = self.settings.annotations.get(index) else {
            warn!(index, "no such annotation");
            return false;
        };
        let camera = &annotation.camera.initial;
        self.commands.push(Command::ActivateAnnotation(LookAt::from_arrays(
            camera.position,
            camera.target,
            camera.fov,
        )));
        true
    }

    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.state.subscribe()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    // Pointer hooks that also update the viewer's input mode.

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState, now: Instant) {
        self.input.on_mouse_button(button, state, now, &mut self.state);
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.input.on_cursor_moved(x, y, &mut self.state);
    }

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2, now: Instant) {
        self.input.on_touch(id, phase, position, now, &mut self.state);
    }

    pub fn manager(&self) -> Option<&CameraManager> {
        self.manager.as_ref()
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Advance by `dt` seconds. Returns `None` until scene bounds are set.
    pub fn update(&mut self, dt: f32) -> Option<FrameOutput> {
        let manager = self.manager.as_mut()?;

        let shown = *manager.camera();
        self.input.update(dt, shown.fov, shown.distance, &mut self.state);
        for command in self.commands.drain() {
            manager.handle_command(command, &mut self.state);
        }
        manager.update(dt, self.input.frame_mut(), &mut self.state);

        let camera = *manager.camera();
        let (near, far) = fit_clip_planes(&self.bounds, camera.position, camera.angles);
        let output = RenderCamera {
            position: camera.position,
            angles: camera.angles,
            fov: camera.fov,
            near,
            far,
            horizontal_fov: self.input.viewport().horizontal_fov(),
        };

        let current = camera.to_array();
        let changed = self
            .last_rendered
            .is_none_or(|last| !nearly_equals(&last, &current, CHANGE_EPSILON));
        let render = self.force_render || (self.state.ready_to_render() && changed);
        if render {
            debug!(forced = self.force_render, "render requested");
            self.last_rendered = Some(current);
            self.force_render = false;
        }

        Some(FrameOutput {
            camera: output,
            render,
        })
    }
}

/// Near and far planes that enclose the bounding sphere of `bounds`.
fn fit_clip_planes(bounds: &BoundingBox, position: Vec3, angles: Vec3) -> (f32, f32) {
    let depth = (bounds.center - position).dot(forward_from_angles(angles));
    let radius = bounds.radius();
    let far = (depth + radius).max(MIN_FAR);
    let near = (depth - radius).max(far / MAX_DEPTH_RATIO);
    (near, far)
}
