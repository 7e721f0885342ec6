use std::time::{Duration, Instant};

use glam::Vec2;

/// Recognises two pointer-downs close in time and space.
///
/// Some touch platforms never deliver a native double-click, so this is
/// tracked manually for every pointer type.
#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    window: Duration,
    radius: f32,
    last: Option<(Instant, Vec2)>,
}

impl DoubleTapDetector {
    pub fn new(window: Duration, radius: f32) -> Self {
        Self {
            window,
            radius,
            last: None,
        }
    }

    /// Register a pointer-down. Returns `true` when it completes a double tap,
    /// after which the next tap starts a fresh sequence.
    pub fn on_pointer_down(&mut self, now: Instant, position: Vec2) -> bool {
        if let Some((time, last)) = self.last
            && now.saturating_duration_since(time) < self.window
            && (position.x - last.x).abs() < self.radius
            && (position.y - last.y).abs() < self.radius
        {
            self.last = None;
            return true;
        }
        self.last = Some((now, position));
        false
    }
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), 8.0)
    }
}
