//! Gamepad input via [`gilrs`].
//!
//! Sticks are filtered through a rescaling deadzone and reported in screen
//! orientation (down is +y) so they combine with pointer deltas. If gilrs
//! has no backend on this platform the source stays idle.

use gilrs::{Axis, EventType, Gilrs};
use glam::Vec2;

use crate::source::InputSource;

#[derive(Debug, thiserror::Error)]
pub enum GamepadError {
    #[error("gamepad backend unavailable: {0}")]
    Init(String),
}

/// Current stick deflection. Sticks are level signals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadDelta {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
}

pub struct GamepadSource {
    gilrs: Option<Gilrs>,
    deadzone: f32,
    sticks: GamepadDelta,
}

impl std::fmt::Debug for GamepadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadSource")
            .field("backend", &self.gilrs.is_some())
            .field("deadzone", &self.deadzone)
            .field("sticks", &self.sticks)
            .finish()
    }
}

impl GamepadSource {
    /// Connect to the platform backend, degrading to an idle source on failure.
    pub fn new(deadzone: f32) -> Self {
        match Self::try_new(deadzone) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("{err}; gamepad input disabled");
                Self::idle(deadzone)
            }
        }
    }

    pub fn try_new(deadzone: f32) -> Result<Self, GamepadError> {
        let gilrs = Gilrs::new().map_err(|e| GamepadError::Init(e.to_string()))?;
        for (_, pad) in gilrs.gamepads().filter(|(_, g)| g.is_connected()) {
            tracing::info!(name = pad.name(), "gamepad connected");
        }
        let mut source = Self::idle(deadzone);
        source.gilrs = Some(gilrs);
        Ok(source)
    }

    /// A source without a backend. Always reports centred sticks.
    pub fn idle(deadzone: f32) -> Self {
        Self {
            gilrs: None,
            deadzone: deadzone.clamp(0.0, 0.99),
            sticks: GamepadDelta::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.gilrs.is_some()
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Apply a raw axis value as gilrs reports it (up is +y).
    pub fn set_axis(&mut self, axis: Axis, raw_value: f32) {
        let value = apply_deadzone(raw_value, self.deadzone);
        match axis {
            Axis::LeftStickX => self.sticks.left_stick.x = value,
            Axis::LeftStickY => self.sticks.left_stick.y = -value,
            Axis::RightStickX => self.sticks.right_stick.x = value,
            Axis::RightStickY => self.sticks.right_stick.y = -value,
            _ => {}
        }
    }

    fn pump(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        let mut axes = Vec::new();
        let mut disconnected = false;
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => {
                    tracing::info!(name = gilrs.gamepad(event.id).name(), "gamepad connected");
                }
                EventType::Disconnected => disconnected = true,
                EventType::AxisChanged(axis, value, _) => axes.push((axis, value)),
                _ => {}
            }
        }
        if disconnected {
            tracing::info!("gamepad disconnected");
            self.sticks = GamepadDelta::default();
        }
        for (axis, value) in axes {
            self.set_axis(axis, value);
        }
    }
}

impl InputSource for GamepadSource {
    type Delta = GamepadDelta;

    fn poll(&mut self) -> GamepadDelta {
        self.pump();
        self.sticks
    }
}

/// Apply deadzone filtering with rescaling.
///
/// If `|raw| < deadzone`, returns `0.0`.
/// Otherwise rescales from `[deadzone, 1.0]` to `[0.0, 1.0]`, preserving sign.
pub(crate) fn apply_deadzone(raw: f32, deadzone: f32) -> f32 {
    let abs = raw.abs();
    if abs < deadzone {
        return 0.0;
    }
    let rescaled = (abs - deadzone) / (1.0 - deadzone);
    rescaled.min(1.0).copysign(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone_filters_small_values() {
        assert_eq!(apply_deadzone(0.1, 0.15), 0.0);
        assert_eq!(apply_deadzone(-0.14, 0.15), 0.0);
    }

    #[test]
    fn test_deadzone_rescales_range() {
        assert!((apply_deadzone(1.0, 0.15) - 1.0).abs() < 1e-6);
        assert!(apply_deadzone(0.16, 0.15) < 0.05);
        assert!((apply_deadzone(-1.0, 0.15) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_idle_source_reports_centred_sticks() {
        let mut pad = GamepadSource::idle(0.15);
        assert!(!pad.is_active());
        assert_eq!(pad.poll(), GamepadDelta::default());
    }

    #[test]
    fn test_stick_up_is_negative_screen_y() {
        let mut pad = GamepadSource::idle(0.0);
        pad.set_axis(Axis::LeftStickY, 1.0);
        pad.set_axis(Axis::RightStickX, 0.5);
        let delta = pad.poll();
        assert_eq!(delta.left_stick, Vec2::new(0.0, -1.0));
        assert_eq!(delta.right_stick, Vec2::new(0.5, 0.0));
        // level signal
        assert_eq!(pad.poll(), delta);
    }

    #[test]
    fn test_deadzone_is_clamped() {
        assert_eq!(GamepadSource::idle(2.0).deadzone(), 0.99);
    }
}
