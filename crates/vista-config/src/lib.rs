//! Configuration for the Vista viewer.
//!
//! Two documents are handled here: the viewer's own runtime [`Config`]
//! (persisted as RON, overridable from the command line), and the authored
//! scene [`ExperienceSettings`] (JSON, versioned, migrated on import).

mod cli;
mod config;
mod error;
mod migrate;
mod settings;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, PlaybackConfig, WindowConfig,
    default_config_dir,
};
pub use error::{ConfigError, SettingsError};
pub use migrate::import_settings;
pub use settings::{
    AnnotationSettings, Background, BloomSettings, CameraSettings, ExperienceSettings,
    FringingSettings, GradingSettings, InitialCamera, PostEffectSettings, SharpnessSettings,
    StartMode, VignetteSettings,
};
