//! Keyboard and mouse as one drain-on-read source.
//!
//! Keys and buttons report edge deltas: `+1` for a press and `-1` for a
//! release since the last poll. Holding a key therefore reports `+1` once;
//! callers integrate the deltas to know what is held. Physical key codes are
//! used so WASD works regardless of keyboard layout.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::source::InputSource;

/// Wheel pixels reported per scrolled line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn pressed(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Keys that drive camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    S,
    Q,
    E,
    Left,
    Right,
    Up,
    Down,
    Shift,
    Ctrl,
}

impl Key {
    pub const COUNT: usize = 12;

    fn from_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::KeyA => Self::A,
            KeyCode::KeyD => Self::D,
            KeyCode::KeyW => Self::W,
            KeyCode::KeyS => Self::S,
            KeyCode::KeyQ => Self::Q,
            KeyCode::KeyE => Self::E,
            KeyCode::ArrowLeft => Self::Left,
            KeyCode::ArrowRight => Self::Right,
            KeyCode::ArrowUp => Self::Up,
            KeyCode::ArrowDown => Self::Down,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Self::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Self::Ctrl,
            _ => return None,
        })
    }
}

/// Button slot: 0 left, 1 middle, 2 right.
fn button_index(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Middle => Some(1),
        MouseButton::Right => Some(2),
        _ => None,
    }
}

/// Everything accumulated since the previous poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardMouseDelta {
    keys: [i32; Key::COUNT],
    pub buttons: [i32; 3],
    /// Cursor movement in pixels.
    pub mouse: Vec2,
    /// Wheel movement in pixels, positive when scrolling towards the user.
    pub wheel: f32,
}

impl KeyboardMouseDelta {
    pub fn key(&self, key: Key) -> i32 {
        self.keys[key as usize]
    }
}

#[derive(Debug, Default)]
pub struct KeyboardMouseSource {
    held_keys: HashSet<PhysicalKey>,
    held_buttons: [bool; 3],
    position: Option<Vec2>,
    delta: KeyboardMouseDelta,
}

impl KeyboardMouseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeat events and presses of an already held key are ignored.
    pub fn on_key(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let changed = match event.state {
            ElementState::Pressed => self.held_keys.insert(event.key),
            ElementState::Released => self.held_keys.remove(&event.key),
        };
        if !changed {
            return;
        }
        if let PhysicalKey::Code(code) = event.key
            && let Some(key) = Key::from_code(code)
        {
            self.delta.keys[key as usize] += edge(event.state);
        }
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(index) = button_index(button) else {
            return;
        };
        let pressed = state == ElementState::Pressed;
        if self.held_buttons[index] != pressed {
            self.held_buttons[index] = pressed;
            self.delta.buttons[index] += edge(state);
        }
    }

    /// Movement only accumulates while a button is held (a drag).
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if let Some(prev) = self.position
            && self.held_buttons.contains(&true)
        {
            self.delta.mouse += position - prev;
        }
        self.position = Some(position);
    }

    pub fn on_cursor_left(&mut self) {
        self.position = None;
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.delta.wheel -= match delta {
            MouseScrollDelta::LineDelta(_, y) => y * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };
    }

    /// Release everything that is held, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for key in std::mem::take(&mut self.held_keys) {
            if let PhysicalKey::Code(code) = key
                && let Some(key) = Key::from_code(code)
            {
                self.delta.keys[key as usize] -= 1;
            }
        }
        for (index, held) in self.held_buttons.iter_mut().enumerate() {
            if std::mem::take(held) {
                self.delta.buttons[index] -= 1;
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held_keys.contains(&PhysicalKey::Code(code))
    }

    /// Ctrl, Alt or Super is down; single-key shortcuts are suppressed.
    pub fn shortcut_modifier_held(&self) -> bool {
        [
            KeyCode::ControlLeft,
            KeyCode::ControlRight,
            KeyCode::AltLeft,
            KeyCode::AltRight,
            KeyCode::SuperLeft,
            KeyCode::SuperRight,
        ]
        .into_iter()
        .any(|code| self.is_held(code))
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.position
    }
}

impl InputSource for KeyboardMouseSource {
    type Delta = KeyboardMouseDelta;

    fn poll(&mut self) -> KeyboardMouseDelta {
        std::mem::take(&mut self.delta)
    }
}

fn edge(state: ElementState) -> i32 {
    match state {
        ElementState::Pressed => 1,
        ElementState::Released => -1,
    }
}
