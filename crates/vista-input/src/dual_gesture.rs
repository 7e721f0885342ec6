//! Fly-style touch gestures: a virtual joystick on the left half of the
//! screen and a look drag on the right half.

use glam::Vec2;
use winit::event::TouchPhase;

use crate::source::InputSource;

/// Joystick travel in pixels that maps to full deflection.
const JOYSTICK_RADIUS: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DualGestureDelta {
    /// Joystick deflection in `[-1, 1]`, screen orientation (down is +y).
    pub left: Vec2,
    /// Look drag in pixels.
    pub right: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct Stick {
    id: u64,
    base: Vec2,
    current: Vec2,
}

#[derive(Debug)]
pub struct DualGestureSource {
    width: f32,
    stick: Option<Stick>,
    look: Option<(u64, Vec2)>,
    look_delta: Vec2,
}

impl DualGestureSource {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            stick: None,
            look: None,
            look_delta: Vec2::ZERO,
        }
    }

    pub fn resize(&mut self, width: f32) {
        self.width = width;
    }

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if position.x < self.width * 0.5 {
                    if self.stick.is_none() {
                        self.stick = Some(Stick {
                            id,
                            base: position,
                            current: position,
                        });
                    }
                } else if self.look.is_none() {
                    self.look = Some((id, position));
                }
            }
            TouchPhase::Moved => {
                if let Some(stick) = self.stick.as_mut()
                    && stick.id == id
                {
                    stick.current = position;
                } else if let Some((look_id, last)) = self.look.as_mut()
                    && *look_id == id
                {
                    self.look_delta += position - *last;
                    *last = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.stick.is_some_and(|s| s.id == id) {
                    self.stick = None;
                }
                if self.look.is_some_and(|(look_id, _)| look_id == id) {
                    self.look = None;
                }
            }
        }
    }

    /// Joystick base position and stick offset from it, in pixels.
    pub fn joystick(&self) -> Option<(Vec2, Vec2)> {
        self.stick.map(|s| (s.base, s.current - s.base))
    }

    fn deflection(&self) -> Vec2 {
        self.stick
            .map(|s| ((s.current - s.base) / JOYSTICK_RADIUS).clamp_length_max(1.0))
            .unwrap_or(Vec2::ZERO)
    }
}

impl InputSource for DualGestureSource {
    type Delta = DualGestureDelta;

    fn poll(&mut self) -> DualGestureDelta {
        DualGestureDelta {
            left: self.deflection(),
            right: std::mem::take(&mut self.look_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_half_starts_joystick() {
        let mut src = DualGestureSource::new(800.0);
        src.on_touch(1, TouchPhase::Started, Vec2::new(100.0, 300.0));
        src.on_touch(1, TouchPhase::Moved, Vec2::new(100.0, 275.0));
        assert_eq!(
            src.joystick(),
            Some((Vec2::new(100.0, 300.0), Vec2::new(0.0, -25.0)))
        );
        // level signal: reported on every poll while held
        assert_eq!(src.poll().left, Vec2::new(0.0, -0.5));
        assert_eq!(src.poll().left, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_deflection_is_clamped() {
        let mut src = DualGestureSource::new(800.0);
        src.on_touch(1, TouchPhase::Started, Vec2::new(100.0, 300.0));
        src.on_touch(1, TouchPhase::Moved, Vec2::new(400.0, 300.0));
        assert!((src.poll().left.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_right_half_drags_look() {
        let mut src = DualGestureSource::new(800.0);
        src.on_touch(2, TouchPhase::Started, Vec2::new(600.0, 300.0));
        src.on_touch(2, TouchPhase::Moved, Vec2::new(610.0, 290.0));
        let delta = src.poll();
        assert_eq!(delta.right, Vec2::new(10.0, -10.0));
        assert_eq!(delta.left, Vec2::ZERO);
        assert_eq!(src.poll().right, Vec2::ZERO);
    }

    #[test]
    fn test_release_clears_joystick() {
        let mut src = DualGestureSource::new(800.0);
        src.on_touch(1, TouchPhase::Started, Vec2::new(10.0, 10.0));
        src.on_touch(1, TouchPhase::Ended, Vec2::new(10.0, 10.0));
        assert_eq!(src.joystick(), None);
        assert_eq!(src.poll().left, Vec2::ZERO);
    }
}
