//! Headless driver for the viewer core.
//!
//! Loads config and scene settings, runs a fixed number of frames at the
//! configured tick rate and logs what a renderer would receive.

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use tracing::{info, warn};
use vista_config::{CliArgs, Config, ExperienceSettings, default_config_dir};
use vista_input::GamepadSource;
use vista_math::BoundingBox;
use vista_viewer::Viewer;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir)
        .with_context(|| format!("loading config from {}", config_dir.display()))?;
    config.apply_cli_overrides(&args);

    vista_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    let settings = match &args.settings {
        Some(path) => ExperienceSettings::load(path)
            .with_context(|| format!("loading scene settings from {}", path.display()))?,
        None => {
            info!("no scene settings given, using defaults");
            ExperienceSettings::default()
        }
    };

    let frame_rate = if config.playback.frame_rate > 0.0 {
        config.playback.frame_rate
    } else {
        warn!(frame_rate = config.playback.frame_rate, "invalid frame rate, using 60");
        60.0
    };
    let dt = 1.0 / frame_rate;

    let gamepad = GamepadSource::new(config.input.gamepad_deadzone);
    let mut viewer = Viewer::new(config, settings, gamepad);
    let changes = viewer.subscribe();

    viewer.set_progress(100);
    viewer.set_scene_bounds(BoundingBox::from_corners(Vec3::NEG_ONE, Vec3::ONE))?;
    viewer.set_ready_to_render(true);
    viewer.first_frame();

    let mut renders = 0u32;
    for frame in 0..args.frames {
        let Some(output) = viewer.update(dt) else {
            continue;
        };
        if output.render {
            renders += 1;
            tracing::trace!(
                frame,
                position = ?output.camera.position,
                angles = ?output.camera.angles,
                fov = output.camera.fov,
                near = output.camera.near,
                far = output.camera.far,
                "render"
            );
        }
        for change in changes.try_iter() {
            tracing::debug!(frame, ?change, "state changed");
        }
    }

    info!(frames = args.frames, renders, "headless run finished");
    Ok(())
}
