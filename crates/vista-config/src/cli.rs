//! Command-line argument parsing for the Vista viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Vista viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "vista", about = "Camera core for an interactive 3D scene viewer")]
pub struct CliArgs {
    /// Path to the scene's experience settings (JSON).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the camera animation paused after the first frame.
    #[arg(long)]
    pub noanim: bool,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if args.noanim {
            self.playback.noanim = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
