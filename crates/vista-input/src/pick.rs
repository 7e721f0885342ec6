//! Asynchronous world-space picking.
//!
//! A [`Picker`] resolves a screen position to a world point, possibly on a
//! later frame. The answer arrives through a [`PickHandle`] that the input
//! controller polls once per update.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use glam::Vec3;

/// Resolves screen positions to world-space points.
pub trait Picker {
    /// Start a pick at pixel `(x, y)`. `None` in the result means nothing
    /// was hit.
    fn pick(&mut self, x: f32, y: f32) -> PickHandle;
}

/// Completes a pending pick.
#[derive(Debug)]
pub struct PickSender(Sender<Option<Vec3>>);

impl PickSender {
    pub fn resolve(self, result: Option<Vec3>) {
        // The handle may have been dropped; that is not an error.
        let _ = self.0.send(result);
    }
}

/// A pick that may not have completed yet.
#[derive(Debug)]
pub struct PickHandle(Receiver<Option<Vec3>>);

/// Outcome of polling a [`PickHandle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickPoll {
    Pending,
    Hit(Vec3),
    Miss,
}

impl PickHandle {
    pub fn channel() -> (PickSender, PickHandle) {
        let (tx, rx) = bounded(1);
        (PickSender(tx), PickHandle(rx))
    }

    /// A pick that is already resolved.
    pub fn ready(result: Option<Vec3>) -> Self {
        let (tx, handle) = Self::channel();
        tx.resolve(result);
        handle
    }

    pub fn poll(&self) -> PickPoll {
        match self.0.try_recv() {
            Ok(Some(point)) => PickPoll::Hit(point),
            Ok(None) | Err(TryRecvError::Disconnected) => PickPoll::Miss,
            Err(TryRecvError::Empty) => PickPoll::Pending,
        }
    }
}
