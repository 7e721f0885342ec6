//! Viewer core: the camera mode state machine and the per-frame loop that
//! feeds an external renderer.

pub mod error;
pub mod manager;
pub mod viewer;

pub use error::ViewerError;
pub use manager::CameraManager;
pub use viewer::{FrameOutput, RenderCamera, Viewer};
