//! Viewer runtime configuration with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vista_math::EasingFunction;

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Input speeds and gesture thresholds.
    pub input: InputConfig,
    /// Camera blending and damping.
    pub camera: CameraConfig,
    /// Animation playback.
    pub playback: PlaybackConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Fly translation speed in world units per second.
    pub move_speed: f32,
    /// Rotation speed in degrees per unit of pointer delta per second.
    pub orbit_speed: f32,
    /// Two-finger pinch zoom speed.
    pub pinch_speed: f32,
    /// Mouse wheel zoom speed.
    pub wheel_speed: f32,
    /// Analog stick deadzone.
    pub gamepad_deadzone: f32,
    /// Maximum delay between taps of a double tap, in milliseconds.
    pub double_tap_ms: u64,
    /// Maximum pointer travel between taps of a double tap, in pixels.
    pub double_tap_px: f32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Blend rate between camera modes; 2.0 gives a half-second blend.
    pub transition_speed: f32,
    /// Curve applied to the blend between camera modes.
    pub transition_easing: EasingFunction,
    /// Fraction of the remaining rotation kept per millisecond.
    pub rotate_damping: f32,
    /// Fraction of the remaining translation kept per millisecond.
    pub move_damping: f32,
    /// Fraction of the remaining zoom kept per millisecond.
    pub zoom_damping: f32,
    /// Closest orbit distance.
    pub zoom_min: f32,
    /// Lowest pitch in degrees.
    pub pitch_min: f32,
    /// Highest pitch in degrees.
    pub pitch_max: f32,
}

/// Animation playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Keep the animation paused after the first frame.
    pub noanim: bool,
    /// Tick rate of the headless frame loop.
    pub frame_rate: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write the JSON log file in release builds too.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            orbit_speed: 18.0,
            pinch_speed: 0.4,
            wheel_speed: 0.06,
            gamepad_deadzone: 0.15,
            double_tap_ms: 300,
            double_tap_px: 8.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            transition_speed: 2.0,
            transition_easing: EasingFunction::ExpoOut,
            rotate_damping: 0.97,
            move_damping: 0.97,
            zoom_damping: 0.97,
            zoom_min: 0.01,
            pitch_min: -90.0,
            pitch_max: 90.0,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            noanim: false,
            frame_rate: 60.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

/// Platform config directory for the viewer, e.g. `~/.config/vista`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vista")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("transition_speed: 2.0"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), input: (move_speed: 8.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.input.move_speed, 8.0);
        assert_eq!(config.input.orbit_speed, 18.0);
    }

    #[test]
    fn test_transition_easing_and_file_logging_parse() {
        let ron_str = "(camera: (transition_easing: Linear), debug: (log_to_file: true))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera.transition_easing, EasingFunction::Linear);
        assert_eq!(config.camera.transition_speed, 2.0);
        assert!(config.debug.log_to_file);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.camera.transition_speed = 4.0;
        config.playback.noanim = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.input.wheel_speed = 0.5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().input.wheel_speed, 0.5);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_default_config_dir_ends_with_vista() {
        assert!(default_config_dir().ends_with("vista"));
    }
}
