//! Authored scene settings (schema version 2).
//!
//! The struct set is closed: unknown fields in a document are ignored on
//! import and there is no way to attach new ones at runtime.

use serde::{Deserialize, Serialize};
use vista_animation::AnimTrack;

use crate::error::SettingsError;

/// Which camera mode a scene starts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartMode {
    #[default]
    Default,
    AnimTrack,
}

/// An authored camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialCamera {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for InitialCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov: 65.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub initial: InitialCamera,
}

/// A labelled point of interest with its own viewing pose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    pub position: [f32; 3],
    pub title: String,
    pub text: String,
    pub camera: CameraSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharpnessSettings {
    pub enabled: bool,
    pub amount: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BloomSettings {
    pub enabled: bool,
    pub intensity: f32,
    pub blur_level: u32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 1.0,
            blur_level: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingSettings {
    pub enabled: bool,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub tint: [f32; 3],
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            tint: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteSettings {
    pub enabled: bool,
    pub intensity: f32,
    pub inner: f32,
    pub outer: f32,
    pub curvature: f32,
}

impl Default for VignetteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
            inner: 0.3,
            outer: 0.75,
            curvature: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FringingSettings {
    pub enabled: bool,
    pub intensity: f32,
}

impl Default for FringingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
        }
    }
}

/// Post-processing parameters, passed through to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostEffectSettings {
    pub sharpness: SharpnessSettings,
    pub bloom: BloomSettings,
    pub grading: GradingSettings,
    pub vignette: VignetteSettings,
    pub fringing: FringingSettings,
}

impl PostEffectSettings {
    /// True when the renderer needs an extra post-processing pass.
    pub fn any_enabled(&self) -> bool {
        self.sharpness.enabled
            || self.bloom.enabled
            || self.grading.enabled
            || self.vignette.enabled
            || self.fringing.enabled
    }
}

/// Scene settings in the current schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSettings {
    pub version: u32,
    #[serde(default = "default_tonemapping")]
    pub tonemapping: String,
    #[serde(default)]
    pub high_precision_rendering: bool,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub post_effect_settings: PostEffectSettings,
    #[serde(default)]
    pub anim_tracks: Vec<AnimTrack>,
    pub cameras: Vec<CameraSettings>,
    #[serde(default)]
    pub annotations: Vec<AnnotationSettings>,
    #[serde(default)]
    pub start_mode: StartMode,
    #[serde(default)]
    pub has_start_pose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_url: Option<String>,
}

fn default_tonemapping() -> String {
    "none".to_string()
}

impl Default for ExperienceSettings {
    fn default() -> Self {
        Self {
            version: 2,
            tonemapping: default_tonemapping(),
            high_precision_rendering: false,
            background: Background::default(),
            post_effect_settings: PostEffectSettings::default(),
            anim_tracks: Vec::new(),
            cameras: vec![CameraSettings::default()],
            annotations: Vec::new(),
            start_mode: StartMode::Default,
            has_start_pose: false,
            sound_url: None,
        }
    }
}

impl ExperienceSettings {
    /// The pose the scene opens with and `reset` returns to.
    pub fn initial_camera(&self) -> Result<&InitialCamera, SettingsError> {
        self.cameras
            .first()
            .map(|c| &c.initial)
            .ok_or(SettingsError::MissingCamera)
    }

    /// Read and import settings from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(SettingsError::Read)?;
        Self::from_json_str(&contents)
    }

    /// Parse and import settings from JSON text of any supported version.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        crate::migrate::import_settings(value)
    }
}
