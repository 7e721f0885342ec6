//! Aggregates every device into the shared [`InputFrame`].

use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};
use vista_config::InputConfig;
use vista_state::{CameraMode, Command, CommandSender, InputMode, ViewerState};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::double_tap::DoubleTapDetector;
use crate::dual_gesture::DualGestureSource;
use crate::frame::InputFrame;
use crate::gamepad::GamepadSource;
use crate::keyboard_mouse::{Key, KeyboardMouseSource, RawKeyEvent};
use crate::multi_touch::MultiTouchSource;
use crate::pick::{PickHandle, PickPoll, Picker};
use crate::screen::{Viewport, screen_to_world};
use crate::source::InputSource;

/// Integrated edge deltas: what is currently held.
#[derive(Debug, Default)]
struct HeldState {
    axis: Vec3,
    mouse: [i32; 3],
    shift: i32,
    ctrl: i32,
    touches: i32,
}

pub struct InputController {
    desktop: KeyboardMouseSource,
    orbit: MultiTouchSource,
    fly: DualGestureSource,
    gamepad: GamepadSource,
    held: HeldState,
    frame: InputFrame,
    viewport: Viewport,
    move_speed: f32,
    orbit_speed: f32,
    pinch_speed: f32,
    wheel_speed: f32,
    double_tap: DoubleTapDetector,
    picker: Option<Box<dyn Picker>>,
    pending_picks: Vec<PickHandle>,
    commands: CommandSender,
}

impl InputController {
    pub fn new(
        config: &InputConfig,
        viewport: Viewport,
        gamepad: GamepadSource,
        commands: CommandSender,
    ) -> Self {
        Self {
            desktop: KeyboardMouseSource::new(),
            orbit: MultiTouchSource::new(),
            fly: DualGestureSource::new(viewport.width),
            gamepad,
            held: HeldState::default(),
            frame: InputFrame::new(),
            viewport,
            move_speed: config.move_speed,
            orbit_speed: config.orbit_speed,
            pinch_speed: config.pinch_speed,
            wheel_speed: config.wheel_speed,
            double_tap: DoubleTapDetector::new(
                Duration::from_millis(config.double_tap_ms),
                config.double_tap_px,
            ),
            picker: None,
            pending_picks: Vec::new(),
            commands,
        }
    }

    /// Install the capability used to resolve double taps.
    pub fn set_picker(&mut self, picker: Box<dyn Picker>) {
        self.picker = Some(picker);
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Scene-size dependent; the viewer overrides the configured default.
    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.fly.resize(viewport.width);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut InputFrame {
        &mut self.frame
    }

    // ── Event hooks ─────────────────────────────────────────────────

    /// Shortcut keys emit their command; any other key press interrupts
    /// the animation.
    pub fn on_key(&mut self, event: RawKeyEvent) {
        if event.state == ElementState::Pressed && !event.repeat {
            let command = match event.key {
                PhysicalKey::Code(code) => self.shortcut(code),
                PhysicalKey::Unidentified(_) => None,
            };
            self.commands.send(command.unwrap_or(Command::Interrupt));
        }
        self.desktop.on_key(event);
    }

    fn shortcut(&self, code: KeyCode) -> Option<Command> {
        if code == KeyCode::Escape {
            return Some(Command::Cancel);
        }
        if self.desktop.shortcut_modifier_held() {
            return None;
        }
        match code {
            KeyCode::KeyF => Some(Command::Frame),
            KeyCode::KeyR => Some(Command::Reset),
            KeyCode::Space => Some(Command::PlayPause),
            _ => None,
        }
    }

    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        now: Instant,
        viewer: &mut ViewerState,
    ) {
        if state == ElementState::Pressed {
            viewer.set_input_mode(InputMode::Desktop);
            self.commands.send(Command::Interrupt);
            if let Some(position) = self.desktop.cursor_position() {
                self.pointer_down(now, position);
            }
        }
        self.desktop.on_button(button, state);
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64, viewer: &mut ViewerState) {
        viewer.set_input_mode(InputMode::Desktop);
        self.commands.send(Command::Interact);
        self.desktop.on_cursor_moved(x, y);
    }

    pub fn on_cursor_left(&mut self) {
        self.desktop.on_cursor_left();
    }

    pub fn on_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        self.commands.send(Command::Interrupt);
        self.desktop.on_scroll(delta);
    }

    pub fn on_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Vec2,
        now: Instant,
        viewer: &mut ViewerState,
    ) {
        viewer.set_input_mode(InputMode::Touch);
        match phase {
            TouchPhase::Started => {
                self.commands.send(Command::Interrupt);
                self.pointer_down(now, position);
            }
            TouchPhase::Moved => self.commands.send(Command::Interact),
            TouchPhase::Ended | TouchPhase::Cancelled => {}
        }
        self.orbit.on_touch(id, phase, position);
        self.fly.on_touch(id, phase, position);
    }

    /// Window lost focus: release held keys and buttons.
    pub fn on_focus_lost(&mut self) {
        self.desktop.release_all();
    }

    fn pointer_down(&mut self, now: Instant, position: Vec2) {
        if !self.double_tap.on_pointer_down(now, position) {
            return;
        }
        match self.picker.as_mut() {
            Some(picker) => {
                tracing::debug!(x = position.x, y = position.y, "double tap, picking");
                self.pending_picks.push(picker.pick(position.x, position.y));
            }
            None => tracing::debug!("double tap ignored, no picker installed"),
        }
    }

    fn poll_picks(&mut self) {
        let commands = &self.commands;
        self.pending_picks.retain(|handle| match handle.poll() {
            PickPoll::Pending => true,
            PickPoll::Hit(point) => {
                tracing::debug!(?point, "pick hit");
                commands.send(Command::Pick(point));
                false
            }
            PickPoll::Miss => {
                tracing::debug!("pick missed");
                false
            }
        });
    }

    // ── Per-frame aggregation ───────────────────────────────────────

    /// Poll all devices and append this update's contributions to the frame.
    ///
    /// `fov` and `distance` come from the displayed camera and make pan
    /// deltas distance-correct.
    pub fn update(&mut self, dt: f32, fov: f32, distance: f32, viewer: &mut ViewerState) {
        let desktop = self.desktop.poll();
        let touch = self.orbit.poll();
        let gesture = self.fly.poll();
        let pad = self.gamepad.poll();
        self.poll_picks();

        let key = |k: Key| desktop.key(k) as f32;
        self.held.axis += Vec3::new(
            (key(Key::D) - key(Key::A)) + (key(Key::Right) - key(Key::Left)),
            key(Key::E) - key(Key::Q),
            (key(Key::W) - key(Key::S)) + (key(Key::Up) - key(Key::Down)),
        );
        self.held.touches += touch.count;
        for (held, delta) in self.held.mouse.iter_mut().zip(desktop.buttons) {
            *held += delta;
        }
        self.held.shift += desktop.key(Key::Shift);
        self.held.ctrl += desktop.key(Key::Ctrl);

        if viewer.camera_mode() != CameraMode::Fly && self.held.axis.length() > 0.0 {
            viewer.set_camera_mode(CameraMode::Fly);
        }

        let mode = viewer.camera_mode();
        let orbit = gate(mode == CameraMode::Orbit);
        let fly = gate(mode == CameraMode::Fly);
        let double = gate(self.held.touches > 1);
        let pan = gate(self.held.mouse[2] > 0 || desktop.buttons[2] == -1 || self.held.touches > 1);
        let orbit_factor = if mode == CameraMode::Fly { fov / 120.0 } else { 1.0 };
        let boost = if self.held.shift > 0 {
            4.0
        } else if self.held.ctrl > 0 {
            0.25
        } else {
            1.0
        };
        let to_world = |d: Vec2| screen_to_world(d.x, d.y, distance, fov, self.viewport);

        // desktop move
        let mut v = self.held.axis.normalize_or_zero() * (fly * self.move_speed * boost * dt);
        v += to_world(desktop.mouse) * pan;
        v += Vec3::new(0.0, 0.0, -desktop.wheel) * (self.wheel_speed * dt);
        // orbit zooms along +z
        if mode == CameraMode::Orbit {
            v.z = -v.z;
        }
        self.frame.append_move(v);

        // desktop rotate
        self.frame.append_rotate(
            desktop.mouse.extend(0.0) * ((1.0 - pan) * self.orbit_speed * orbit_factor * dt),
        );

        // touch move
        let mut v = to_world(touch.touch) * (orbit * pan);
        v += Vec3::new(gesture.left.x, 0.0, -gesture.left.y) * (fly * self.move_speed * dt);
        v += Vec3::new(0.0, 0.0, touch.pinch) * (orbit * double * self.pinch_speed * dt);
        self.frame.append_move(v);

        // touch rotate
        let mut v = touch.touch.extend(0.0) * (orbit * (1.0 - pan) * self.orbit_speed * dt);
        v += gesture.right.extend(0.0) * (fly * self.orbit_speed * orbit_factor * dt);
        self.frame.append_rotate(v);

        // gamepad
        self.frame.append_move(
            Vec3::new(pad.left_stick.x, 0.0, -pad.left_stick.y) * (self.move_speed * dt),
        );
        self.frame.append_rotate(
            pad.right_stick.extend(0.0) * (self.orbit_speed * orbit_factor * dt),
        );

        if mode == CameraMode::Fly {
            let (base, stick) = self.fly.joystick().unzip();
            viewer.publish_touch_joystick(base, stick);
        }
    }
}

fn gate(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}
