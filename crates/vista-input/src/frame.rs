//! The accumulator shared between input aggregation and the active controller.

use glam::Vec3;

/// Summed deltas handed to a controller by [`InputFrame::read`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameDeltas {
    pub movement: Vec3,
    pub rotate: Vec3,
}

/// Per-update move and rotate contributions, one entry per device group.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    movement: Vec<Vec3>,
    rotate: Vec<Vec3>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_move(&mut self, delta: Vec3) {
        self.movement.push(delta);
    }

    pub fn append_rotate(&mut self, delta: Vec3) {
        self.rotate.push(delta);
    }

    /// Sum and clear both channels.
    pub fn read(&mut self) -> FrameDeltas {
        FrameDeltas {
            movement: self.movement.drain(..).sum(),
            rotate: self.rotate.drain(..).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movement.is_empty() && self.rotate.is_empty()
    }
}
