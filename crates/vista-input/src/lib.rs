//! Device input normalised into one per-frame control signal.
//!
//! Each device is an [`InputSource`] with a destructive `poll`. The
//! [`InputController`] polls every source once per update, combines their
//! deltas according to the active camera mode, and appends the result to the
//! shared [`InputFrame`] that the active camera controller drains.

pub mod controller;
pub mod double_tap;
pub mod dual_gesture;
pub mod frame;
pub mod gamepad;
pub mod keyboard_mouse;
pub mod multi_touch;
pub mod pick;
pub mod screen;
pub mod source;

pub use controller::InputController;
pub use double_tap::DoubleTapDetector;
pub use dual_gesture::{DualGestureDelta, DualGestureSource};
pub use frame::{FrameDeltas, InputFrame};
pub use gamepad::{GamepadDelta, GamepadError, GamepadSource};
pub use keyboard_mouse::{Key, KeyboardMouseDelta, KeyboardMouseSource, RawKeyEvent};
pub use multi_touch::{MultiTouchDelta, MultiTouchSource};
pub use pick::{PickHandle, PickPoll, PickSender, Picker};
pub use screen::{Viewport, screen_to_world};
pub use source::InputSource;
