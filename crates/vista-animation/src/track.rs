//! Authored camera animation tracks.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::cursor::LoopMode;

/// Interpolation between keyframes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Step,
    Linear,
    #[default]
    Spline,
}

/// Flattened keyframe channels, three components per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimValues {
    pub position: Vec<f32>,
    pub target: Vec<f32>,
    /// One fov (degrees) per key. May be empty for tracks that never
    /// animate the field of view.
    pub fov: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimKeyframes {
    /// Key times in source frame units, strictly increasing.
    pub times: Vec<f32>,
    pub values: AnimValues,
}

/// A keyframed camera path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimTrack {
    #[serde(default)]
    pub name: String,
    /// Length in seconds.
    pub duration: f32,
    /// Source frames per second; key times are divided by this.
    pub frame_rate: f32,
    #[serde(default)]
    pub loop_mode: LoopMode,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// 0 = linear tangents, 1 = fully smooth.
    #[serde(default)]
    pub smoothness: f32,
    pub keyframes: AnimKeyframes,
}

impl AnimTrack {
    pub fn key_count(&self) -> usize {
        self.keyframes.times.len()
    }
}

/// Build a looping orbit around `target` starting from `position`.
///
/// Keys are evenly spaced over `duration` seconds; key `i` is the start
/// offset rotated about +Y by `-i / keys * 360` degrees.
pub fn create_rotate_track(
    position: Vec3,
    target: Vec3,
    fov: f32,
    keys: usize,
    duration: f32,
) -> AnimTrack {
    let keys = keys.max(1);
    let offset = position - target;

    let mut times = Vec::with_capacity(keys);
    let mut positions = Vec::with_capacity(keys * 3);
    let mut targets = Vec::with_capacity(keys * 3);

    for i in 0..keys {
        let fraction = i as f32 / keys as f32;
        times.push(fraction * duration);

        let rotation = Quat::from_euler(EulerRot::YXZ, (-fraction * 360.0).to_radians(), 0.0, 0.0);
        let p = target + rotation * offset;
        positions.extend_from_slice(&p.to_array());
        targets.extend_from_slice(&target.to_array());
    }

    AnimTrack {
        name: "rotate".to_string(),
        duration,
        frame_rate: 1.0,
        loop_mode: LoopMode::Repeat,
        interpolation: Interpolation::Spline,
        smoothness: 1.0,
        keyframes: AnimKeyframes {
            times,
            values: AnimValues {
                position: positions,
                target: targets,
                fov: vec![fov; keys],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_track_shape() {
        let track = create_rotate_track(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO, 60.0, 12, 20.0);
        assert_eq!(track.key_count(), 12);
        assert_eq!(track.keyframes.values.position.len(), 36);
        assert_eq!(track.keyframes.values.target.len(), 36);
        assert_eq!(track.keyframes.values.fov, vec![60.0; 12]);
        assert_eq!(track.loop_mode, LoopMode::Repeat);
        assert_eq!(track.frame_rate, 1.0);
        assert!((track.keyframes.times[11] - 20.0 * 11.0 / 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_track_keeps_radius_and_height() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        let start = target + Vec3::new(0.0, 1.5, 4.0);
        let track = create_rotate_track(start, target, 50.0, 8, 16.0);
        for key in track.keyframes.values.position.chunks(3) {
            let p = Vec3::from_slice(key);
            let d = p - target;
            assert!((d.y - 1.5).abs() < 1e-5);
            assert!((Vec3::new(d.x, 0.0, d.z).length() - 4.0).abs() < 1e-4);
        }
        let first = Vec3::from_slice(&track.keyframes.values.position[0..3]);
        assert!((first - start).length() < 1e-5);
    }

    #[test]
    fn test_track_parses_from_camel_case_json() {
        let json = r#"{
            "name": "fly-through",
            "duration": 4,
            "frameRate": 30,
            "loopMode": "pingpong",
            "interpolation": "spline",
            "smoothness": 0.5,
            "keyframes": {
                "times": [0, 60, 120],
                "values": {
                    "position": [0,0,5, 1,0,5, 2,0,5],
                    "target": [0,0,0, 0,0,0, 0,0,0],
                    "fov": [60, 60, 60]
                }
            }
        }"#;
        let track: AnimTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.frame_rate, 30.0);
        assert_eq!(track.loop_mode, LoopMode::PingPong);
        assert_eq!(track.key_count(), 3);
    }
}
