use serde::{Deserialize, Serialize};

/// Which controller drives the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Orbit around a focus point.
    #[default]
    Orbit,
    /// First-person free flight.
    Fly,
    /// Scripted camera path.
    Anim,
}

/// The kind of pointer device the user most recently used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Desktop,
    Touch,
}
