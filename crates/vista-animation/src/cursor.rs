//! Playhead over a track's duration with loop wrapping.

use serde::{Deserialize, Serialize};
use vista_math::modulo;

/// What happens when playback reaches the end of a track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop at the last frame.
    #[default]
    None,
    /// Jump back to the start.
    Repeat,
    /// Play forwards then backwards.
    PingPong,
}

/// Playhead over a track of `duration` seconds with a loop policy.
///
/// For [`LoopMode::PingPong`] the internal cursor runs over
/// `[0, 2 * duration)` and [`value`](Self::value) folds it into a triangle
/// wave over `[0, duration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimCursor {
    duration: f32,
    loop_mode: LoopMode,
    timer: f32,
    cursor: f32,
}

impl AnimCursor {
    pub fn new(duration: f32, loop_mode: LoopMode) -> Self {
        let mut cursor = Self {
            duration: 0.0,
            loop_mode,
            timer: 0.0,
            cursor: 0.0,
        };
        cursor.reset(duration, loop_mode);
        cursor
    }

    /// Advance by `dt` seconds, applying the loop policy on overflow.
    pub fn update(&mut self, dt: f32) {
        self.timer += dt;

        if self.duration <= 0.0 {
            return;
        }

        self.cursor += dt;
        if self.cursor >= self.duration {
            match self.loop_mode {
                LoopMode::None => self.cursor = self.duration,
                LoopMode::Repeat => self.cursor %= self.duration,
                LoopMode::PingPong => self.cursor %= self.duration * 2.0,
            }
        }
    }

    /// Restart at zero with a new duration and loop policy. Negative
    /// durations are treated as zero.
    pub fn reset(&mut self, duration: f32, loop_mode: LoopMode) {
        self.duration = duration.max(0.0);
        self.loop_mode = loop_mode;
        self.timer = 0.0;
        self.cursor = 0.0;
    }

    /// Current playhead in `[0, duration]`.
    pub fn value(&self) -> f32 {
        if self.cursor > self.duration {
            2.0 * self.duration - self.cursor
        } else {
            self.cursor
        }
    }

    /// Jump to an absolute time, wrapped into `[0, duration)`.
    pub fn set_value(&mut self, value: f32) {
        if self.duration > 0.0 {
            self.cursor = modulo(value, self.duration);
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Total wall time fed through [`update`](Self::update) since the last
    /// reset.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Raw internal cursor, before ping-pong folding.
    pub fn raw(&self) -> f32 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_wraps_modulo_duration() {
        let mut c = AnimCursor::new(10.0, LoopMode::Repeat);
        c.update(5.0);
        c.update(5.0);
        c.update(2.0);
        assert_eq!(c.value(), 2.0);

        let mut single = AnimCursor::new(10.0, LoopMode::Repeat);
        single.update(12.0);
        assert_eq!(single.value(), 2.0);
    }

    #[test]
    fn test_none_clamps_at_duration() {
        let mut c = AnimCursor::new(10.0, LoopMode::None);
        for _ in 0..50 {
            c.update(0.7);
            assert!(c.value() <= 10.0);
        }
        assert_eq!(c.value(), 10.0);
        c.update(100.0);
        assert_eq!(c.value(), 10.0);
    }

    #[test]
    fn test_pingpong_is_triangle_wave() {
        let mut c = AnimCursor::new(10.0, LoopMode::PingPong);
        c.update(4.0);
        assert_eq!(c.value(), 4.0);
        c.update(9.0);
        assert_eq!(c.raw(), 13.0);
        assert_eq!(c.value(), 7.0);
        c.update(6.0);
        assert_eq!(c.raw(), 19.0);
        assert_eq!(c.value(), 1.0);
        c.update(3.0);
        assert_eq!(c.raw(), 2.0);
        assert_eq!(c.value(), 2.0);
    }

    #[test]
    fn test_pingpong_value_stays_in_range() {
        let mut c = AnimCursor::new(3.0, LoopMode::PingPong);
        for _ in 0..200 {
            c.update(0.13);
            let v = c.value();
            assert!((0.0..=3.0).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn test_set_value_wraps_into_duration() {
        let mut c = AnimCursor::new(10.0, LoopMode::Repeat);
        c.set_value(23.0);
        assert!((c.value() - 3.0).abs() < 1e-5);
        c.set_value(-1.0);
        assert!((c.value() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_timer_accumulates_independently() {
        let mut c = AnimCursor::new(1.0, LoopMode::Repeat);
        c.update(0.75);
        c.update(0.75);
        assert!((c.timer() - 1.5).abs() < 1e-6);
        assert!((c.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restarts_playback() {
        let mut c = AnimCursor::new(10.0, LoopMode::Repeat);
        c.update(4.0);
        c.reset(5.0, LoopMode::None);
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.timer(), 0.0);
        assert_eq!(c.duration(), 5.0);
        assert_eq!(c.loop_mode(), LoopMode::None);
    }

    #[test]
    fn test_zero_duration_stays_at_origin() {
        let mut c = AnimCursor::new(0.0, LoopMode::Repeat);
        c.update(1.0);
        c.set_value(3.0);
        assert_eq!(c.value(), 0.0);
    }

    #[test]
    fn test_loop_mode_serializes_lowercase() {
        let json = serde_json::to_string(&LoopMode::PingPong).unwrap();
        assert_eq!(json, "\"pingpong\"");
        let mode: LoopMode = serde_json::from_str("\"repeat\"").unwrap();
        assert_eq!(mode, LoopMode::Repeat);
    }
}
