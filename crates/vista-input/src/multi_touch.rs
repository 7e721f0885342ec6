//! Orbit-style touch gestures: one finger drags, two fingers pan and pinch.

use std::collections::BTreeMap;

use glam::Vec2;
use winit::event::TouchPhase;

use crate::source::InputSource;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MultiTouchDelta {
    /// Movement of the touch centroid in pixels.
    pub touch: Vec2,
    /// Change in finger spread in pixels; negative while spreading apart.
    pub pinch: f32,
    /// Touches added minus touches removed.
    pub count: i32,
}

#[derive(Debug, Default)]
pub struct MultiTouchSource {
    touches: BTreeMap<u64, Vec2>,
    delta: MultiTouchDelta,
}

impl MultiTouchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if self.touches.insert(id, position).is_none() {
                    self.delta.count += 1;
                }
            }
            TouchPhase::Moved => {
                let Some(before) = self.centroid_and_spread() else {
                    return;
                };
                let Some(slot) = self.touches.get_mut(&id) else {
                    return;
                };
                *slot = position;
                if let Some(after) = self.centroid_and_spread() {
                    self.delta.touch += after.0 - before.0;
                    if self.touches.len() > 1 {
                        self.delta.pinch += before.1 - after.1;
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches.remove(&id).is_some() {
                    self.delta.count -= 1;
                }
            }
        }
    }

    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Centroid of active touches and mean distance from it.
    fn centroid_and_spread(&self) -> Option<(Vec2, f32)> {
        if self.touches.is_empty() {
            return None;
        }
        let n = self.touches.len() as f32;
        let centroid = self.touches.values().copied().sum::<Vec2>() / n;
        let spread = self
            .touches
            .values()
            .map(|p| p.distance(centroid))
            .sum::<f32>()
            / n;
        Some((centroid, spread))
    }
}

impl InputSource for MultiTouchSource {
    type Delta = MultiTouchDelta;

    fn poll(&mut self) -> MultiTouchDelta {
        std::mem::take(&mut self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_finger_drag() {
        let mut src = MultiTouchSource::new();
        src.on_touch(1, TouchPhase::Started, Vec2::new(10.0, 10.0));
        src.on_touch(1, TouchPhase::Moved, Vec2::new(14.0, 7.0));
        let delta = src.poll();
        assert_eq!(delta.touch, Vec2::new(4.0, -3.0));
        assert_eq!(delta.pinch, 0.0);
        assert_eq!(delta.count, 1);
    }

    #[test]
    fn test_spreading_fingers_pinch_negative() {
        let mut src = MultiTouchSource::new();
        src.on_touch(1, TouchPhase::Started, Vec2::new(-10.0, 0.0));
        src.on_touch(2, TouchPhase::Started, Vec2::new(10.0, 0.0));
        src.poll();
        src.on_touch(1, TouchPhase::Moved, Vec2::new(-20.0, 0.0));
        src.on_touch(2, TouchPhase::Moved, Vec2::new(20.0, 0.0));
        let delta = src.poll();
        assert!((delta.pinch + 10.0).abs() < 1e-5);
        assert!(delta.touch.length() < 1e-5);
    }

    #[test]
    fn test_count_tracks_lifecycle() {
        let mut src = MultiTouchSource::new();
        src.on_touch(1, TouchPhase::Started, Vec2::ZERO);
        src.on_touch(2, TouchPhase::Started, Vec2::ONE);
        assert_eq!(src.poll().count, 2);
        src.on_touch(1, TouchPhase::Ended, Vec2::ZERO);
        src.on_touch(2, TouchPhase::Cancelled, Vec2::ONE);
        assert_eq!(src.poll().count, -2);
        assert_eq!(src.active_touches(), 0);
    }

    #[test]
    fn test_unknown_touch_move_ignored() {
        let mut src = MultiTouchSource::new();
        src.on_touch(7, TouchPhase::Moved, Vec2::ONE);
        assert_eq!(src.poll(), MultiTouchDelta::default());
    }
}
