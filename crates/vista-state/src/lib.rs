//! Shared viewer state and the event plumbing around it.
//!
//! [`ViewerState`] is a closed, typed set of observable fields; every
//! setter publishes a [`StateChange`] to subscribers when the value actually
//! changes. Inbound user intents travel the other way as [`Command`]s through
//! a [`CommandQueue`].

pub mod command;
pub mod mode;
pub mod state;

pub use command::{Command, CommandQueue, CommandSender};
pub use mode::{CameraMode, InputMode};
pub use state::{StateChange, ViewerState};
