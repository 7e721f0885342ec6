//! Inbound commands from the UI and input layers.

use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec3;
use vista_math::LookAt;

/// A discrete user intent, as opposed to continuous per-frame input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Orbit and frame the whole scene.
    Frame,
    /// Orbit and return to the authored initial camera.
    Reset,
    /// Toggle animation playback, entering the animation if needed.
    PlayPause,
    /// Leave the animation (Escape).
    Cancel,
    /// Leave the animation because the user touched the controls.
    Interrupt,
    /// Pointer moved; only UI collaborators care.
    Interact,
    /// Jump the animation to a time in seconds.
    ScrubAnim(f32),
    /// A world-space point was picked; orbit towards it.
    Pick(Vec3),
    /// An annotation was activated; orbit to its authored pose.
    ActivateAnnotation(LookAt),
}

/// Cloneable handle for posting commands from other components or threads.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Post a command. Silently dropped if the queue is gone.
    pub fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            tracing::debug!("command queue closed, dropping command");
        }
    }
}

/// Unbounded FIFO of commands, drained once per frame.
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    pub fn push(&self, command: Command) {
        // The queue owns a receiver, so the channel cannot be disconnected.
        let _ = self.tx.send(command);
    }

    /// Take every queued command in arrival order.
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let queue = CommandQueue::new();
        queue.push(Command::Frame);
        queue.sender().send(Command::ScrubAnim(1.5));
        assert_eq!(queue.drain(), vec![Command::Frame, Command::ScrubAnim(1.5)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sender_works_across_threads() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || sender.send(Command::Pick(Vec3::ONE)))
            .join()
            .unwrap();
        assert_eq!(queue.drain(), vec![Command::Pick(Vec3::ONE)]);
    }
}
