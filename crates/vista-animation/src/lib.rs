//! Keyframed camera animation: cubic Hermite splines, looping playback
//! cursors and the authored track format.

pub mod cursor;
pub mod spline;
pub mod state;
pub mod track;

pub use cursor::{AnimCursor, LoopMode};
pub use spline::{CubicSpline, SplineError};
pub use state::AnimState;
pub use track::{AnimKeyframes, AnimTrack, AnimValues, Interpolation, create_rotate_track};
