//! Import of older settings documents into the current schema.
//!
//! Documents without a `version` field go through two passes: the first
//! fills in per-track defaults that early exporters omitted, the second
//! restructures the single-camera layout into the versioned schema.

use serde::Deserialize;
use vista_animation::{AnimKeyframes, AnimTrack, AnimValues, Interpolation, LoopMode};

use crate::error::SettingsError;
use crate::settings::{
    Background, CameraSettings, ExperienceSettings, InitialCamera, PostEffectSettings, StartMode,
};

const DEFAULT_FRAME_RATE: f32 = 30.0;
const DEFAULT_TRACK_FOV: f32 = 60.0;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsV1 {
    camera: CameraV1,
    background: BackgroundV1,
    anim_tracks: Option<Vec<AnimTrackV1>>,
    sound_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CameraV1 {
    position: Option<[f32; 3]>,
    target: Option<[f32; 3]>,
    fov: Option<f32>,
    start_anim: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BackgroundV1 {
    color: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimTrackV1 {
    #[serde(default)]
    name: String,
    duration: f32,
    #[serde(default)]
    frame_rate: Option<f32>,
    #[serde(default)]
    loop_mode: LoopMode,
    #[serde(default)]
    interpolation: Interpolation,
    #[serde(default)]
    smoothness: Option<f32>,
    keyframes: KeyframesV1,
}

#[derive(Debug, Deserialize)]
struct KeyframesV1 {
    times: Vec<f32>,
    values: ValuesV1,
}

#[derive(Debug, Deserialize)]
struct ValuesV1 {
    position: Vec<f32>,
    target: Vec<f32>,
}

/// Convert a settings document of any supported version to the current
/// schema.
///
/// Version absent: migrated. Version 2: parsed as is. Anything else is
/// rejected with [`SettingsError::UnsupportedVersion`].
pub fn import_settings(document: serde_json::Value) -> Result<ExperienceSettings, SettingsError> {
    match document.get("version") {
        None | Some(serde_json::Value::Null) => {
            let mut v1: SettingsV1 =
                serde_json::from_value(document).map_err(SettingsError::Parse)?;
            migrate_v1(&mut v1);
            let settings = migrate_v2(v1);
            log::info!("Migrated unversioned experience settings to version 2");
            Ok(settings)
        }
        Some(version) if version.as_u64() == Some(2) => {
            serde_json::from_value(document).map_err(SettingsError::Parse)
        }
        Some(version) => Err(SettingsError::UnsupportedVersion(version.clone())),
    }
}

/// Fill in track fields that early exports left out.
fn migrate_v1(settings: &mut SettingsV1) {
    let tracks = settings.anim_tracks.get_or_insert_with(Vec::new);
    for track in tracks.iter_mut() {
        // Early exports stored key times in seconds with no frame rate.
        if track.frame_rate.is_none_or(|rate| rate == 0.0) {
            track.frame_rate = Some(DEFAULT_FRAME_RATE);
            for time in &mut track.keyframes.times {
                *time *= DEFAULT_FRAME_RATE;
            }
        }
        if track.smoothness.is_none() {
            track.smoothness = Some(0.0);
        }
    }
}

/// Restructure a v1 document into the versioned schema.
fn migrate_v2(v1: SettingsV1) -> ExperienceSettings {
    let camera = &v1.camera;
    let track_fov = camera
        .fov
        .filter(|fov| *fov != 0.0)
        .unwrap_or(DEFAULT_TRACK_FOV);
    let defaults = InitialCamera::default();

    let anim_tracks = v1
        .anim_tracks
        .unwrap_or_default()
        .into_iter()
        .map(|track| {
            let keys = track.keyframes.times.len();
            AnimTrack {
                name: track.name,
                duration: track.duration,
                frame_rate: track.frame_rate.unwrap_or(DEFAULT_FRAME_RATE),
                loop_mode: track.loop_mode,
                interpolation: track.interpolation,
                smoothness: track.smoothness.unwrap_or(0.0),
                keyframes: AnimKeyframes {
                    times: track.keyframes.times,
                    values: AnimValues {
                        position: track.keyframes.values.position,
                        target: track.keyframes.values.target,
                        fov: vec![track_fov; keys],
                    },
                },
            }
        })
        .collect();

    ExperienceSettings {
        version: 2,
        tonemapping: "none".to_string(),
        high_precision_rendering: false,
        background: Background {
            color: v1.background.color.unwrap_or([0.0, 0.0, 0.0]),
        },
        post_effect_settings: PostEffectSettings::default(),
        anim_tracks,
        cameras: vec![CameraSettings {
            initial: InitialCamera {
                position: camera.position.unwrap_or(defaults.position),
                target: camera.target.unwrap_or(defaults.target),
                fov: camera.fov.filter(|fov| *fov != 0.0).unwrap_or(defaults.fov),
            },
        }],
        annotations: Vec::new(),
        start_mode: if camera.start_anim.as_deref() == Some("animTrack") {
            StartMode::AnimTrack
        } else {
            StartMode::Default
        },
        has_start_pose: camera.position.is_some() && camera.target.is_some(),
        sound_url: v1.sound_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v1_document() -> serde_json::Value {
        json!({
            "camera": {
                "position": [2, 1, 4],
                "target": [0, 0.5, 0],
                "fov": 50,
                "startAnim": "animTrack"
            },
            "background": { "color": [0.1, 0.2, 0.3] },
            "animTracks": [{
                "name": "cam",
                "duration": 2,
                "loopMode": "repeat",
                "interpolation": "spline",
                "keyframes": {
                    "times": [0, 1, 2],
                    "values": {
                        "position": [0,0,5, 1,0,5, 2,0,5],
                        "target": [0,0,0, 0,0,0, 0,0,0]
                    }
                }
            }]
        })
    }

    #[test]
    fn test_v1_missing_frame_rate_rescales_times() {
        let settings = import_settings(v1_document()).unwrap();
        let track = &settings.anim_tracks[0];
        assert_eq!(track.frame_rate, 30.0);
        assert_eq!(track.keyframes.times, vec![0.0, 30.0, 60.0]);
        assert_eq!(track.smoothness, 0.0);
    }

    #[test]
    fn test_v1_existing_frame_rate_kept() {
        let mut doc = v1_document();
        doc["animTracks"][0]["frameRate"] = json!(24);
        doc["animTracks"][0]["smoothness"] = json!(0.8);
        let settings = import_settings(doc).unwrap();
        let track = &settings.anim_tracks[0];
        assert_eq!(track.frame_rate, 24.0);
        assert_eq!(track.keyframes.times, vec![0.0, 1.0, 2.0]);
        assert!((track.smoothness - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_v1_restructured_into_cameras() {
        let settings = import_settings(v1_document()).unwrap();
        assert_eq!(settings.version, 2);
        let camera = settings.initial_camera().unwrap();
        assert_eq!(camera.position, [2.0, 1.0, 4.0]);
        assert_eq!(camera.target, [0.0, 0.5, 0.0]);
        assert_eq!(camera.fov, 50.0);
        assert!(settings.has_start_pose);
        assert_eq!(settings.start_mode, StartMode::AnimTrack);
        assert_eq!(settings.background.color, [0.1, 0.2, 0.3]);
        assert_eq!(settings.anim_tracks[0].keyframes.values.fov, vec![50.0; 3]);
        assert!(settings.annotations.is_empty());
        assert!(!settings.post_effect_settings.any_enabled());
    }

    #[test]
    fn test_v1_without_tracks_or_camera_uses_defaults() {
        let settings = import_settings(json!({ "camera": {}, "background": {} })).unwrap();
        assert!(settings.anim_tracks.is_empty());
        let camera = settings.initial_camera().unwrap();
        assert_eq!(camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(camera.target, [0.0, 0.0, 0.0]);
        assert_eq!(camera.fov, 65.0);
        assert!(!settings.has_start_pose);
        assert_eq!(settings.start_mode, StartMode::Default);
    }

    #[test]
    fn test_v1_track_fov_defaults_to_sixty() {
        let mut doc = v1_document();
        doc["camera"] = json!({});
        let settings = import_settings(doc).unwrap();
        assert_eq!(settings.anim_tracks[0].keyframes.values.fov, vec![60.0; 3]);
        assert_eq!(settings.initial_camera().unwrap().fov, 65.0);
    }

    #[test]
    fn test_v2_passes_through() {
        let doc = json!({
            "version": 2,
            "cameras": [{ "initial": { "position": [0, 0, 3], "target": [0, 0, 0], "fov": 40 } }],
            "annotations": [{
                "position": [1, 0, 0],
                "title": "Door",
                "text": "Front entrance",
                "camera": { "initial": { "position": [3, 0, 0], "target": [1, 0, 0], "fov": 45 } }
            }],
            "startMode": "default",
            "hasStartPose": true
        });
        let settings = import_settings(doc).unwrap();
        assert_eq!(settings.annotations.len(), 1);
        assert_eq!(settings.annotations[0].title, "Door");
        assert_eq!(settings.annotations[0].camera.initial.fov, 45.0);
        assert!(settings.has_start_pose);
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let result = import_settings(json!({ "version": 3, "cameras": [] }));
        assert!(matches!(result, Err(SettingsError::UnsupportedVersion(_))));
        let result = import_settings(json!({ "version": "beta" }));
        assert!(matches!(result, Err(SettingsError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_malformed_v2_is_parse_error() {
        let result = import_settings(json!({ "version": 2 }));
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
