//! Sampling of a camera track into position, target and fov.

use glam::Vec3;
use tracing::trace;

use crate::cursor::{AnimCursor, LoopMode};
use crate::spline::{CubicSpline, SplineError};
use crate::track::AnimTrack;

/// Playback state for one camera track: a looping spline over position and
/// target (and optionally fov) driven by an [`AnimCursor`].
#[derive(Debug, Clone)]
pub struct AnimState {
    pub spline: CubicSpline,
    pub cursor: AnimCursor,
    pub frame_rate: f32,
    result: Vec<f32>,
    pub position: Vec3,
    pub target: Vec3,
    /// Sampled fov, present when the spline carries a seventh channel.
    pub fov: Option<f32>,
}

impl AnimState {
    pub fn new(spline: CubicSpline, duration: f32, loop_mode: LoopMode, frame_rate: f32) -> Self {
        let dim = spline.dim();
        Self {
            spline,
            cursor: AnimCursor::new(duration, loop_mode),
            frame_rate,
            result: vec![0.0; dim],
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            fov: None,
        }
    }

    /// Advance the cursor and resample the spline.
    ///
    /// The sample is committed only when every channel is finite; otherwise
    /// the previous pose is kept.
    pub fn update(&mut self, dt: f32) {
        self.cursor.update(dt);
        self.spline
            .evaluate(self.cursor.value() * self.frame_rate, &mut self.result);

        if !self.result.iter().all(|v| v.is_finite()) {
            trace!(time = self.cursor.value(), "skipping non-finite spline sample");
            return;
        }
        if self.result.len() >= 6 {
            self.position = Vec3::from_slice(&self.result[0..3]);
            self.target = Vec3::from_slice(&self.result[3..6]);
        }
        if self.result.len() >= 7 {
            self.fov = Some(self.result[6]);
        }
    }

    /// Build playback state from an authored track.
    ///
    /// Position and target are interleaved into six channels per key; a
    /// seventh fov channel is added when the track has one fov per key.
    pub fn from_track(track: &AnimTrack) -> Result<Self, SplineError> {
        let times = &track.keyframes.times;
        let values = &track.keyframes.values;
        let n = times.len();
        if n == 0 {
            return Err(SplineError::Empty);
        }
        if values.position.len() < n * 3 || values.target.len() < n * 3 {
            return Err(SplineError::PointCountMismatch {
                points: values.position.len().min(values.target.len()),
                times: n,
            });
        }
        let with_fov = values.fov.len() == n;
        let dim = if with_fov { 7 } else { 6 };

        let mut points = Vec::with_capacity(n * dim);
        for i in 0..n {
            points.extend_from_slice(&values.position[i * 3..i * 3 + 3]);
            points.extend_from_slice(&values.target[i * 3..i * 3 + 3]);
            if with_fov {
                points.push(values.fov[i]);
            }
        }

        // A key sitting exactly on the end time would duplicate the looped
        // first key, so stretch the loop by one frame.
        let last_seconds = times[n - 1] / track.frame_rate;
        let extra = if track.duration == last_seconds { 1.0 } else { 0.0 };
        let spline = CubicSpline::from_points_looping(
            (track.duration + extra) * track.frame_rate,
            times,
            &points,
            track.smoothness,
        )?;

        Ok(Self::new(
            spline,
            track.duration,
            track.loop_mode,
            track.frame_rate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{AnimKeyframes, AnimValues, Interpolation, create_rotate_track};

    fn line_track(loop_mode: LoopMode) -> AnimTrack {
        AnimTrack {
            name: "line".into(),
            duration: 2.0,
            frame_rate: 10.0,
            loop_mode,
            interpolation: Interpolation::Spline,
            smoothness: 0.0,
            keyframes: AnimKeyframes {
                times: vec![0.0, 10.0],
                values: AnimValues {
                    position: vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0],
                    target: vec![0.0, 0.0, -1.0, 10.0, 0.0, -1.0],
                    fov: vec![40.0, 80.0],
                },
            },
        }
    }

    #[test]
    fn test_from_track_builds_seven_channels_with_fov() {
        let state = AnimState::from_track(&line_track(LoopMode::Repeat)).unwrap();
        assert_eq!(state.spline.dim(), 7);
        assert_eq!(state.cursor.duration(), 2.0);
    }

    #[test]
    fn test_update_samples_position_target_and_fov() {
        let mut state = AnimState::from_track(&line_track(LoopMode::None)).unwrap();
        state.update(0.0);
        assert!(state.position.length() < 1e-5);
        assert!((state.target - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((state.fov.unwrap() - 40.0).abs() < 1e-4);

        state.update(0.5);
        assert!((state.position.x - 5.0).abs() < 1e-4);
        assert!((state.fov.unwrap() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_track_without_fov_uses_six_channels() {
        let mut track = line_track(LoopMode::Repeat);
        track.keyframes.values.fov.clear();
        let mut state = AnimState::from_track(&track).unwrap();
        assert_eq!(state.spline.dim(), 6);
        state.update(0.1);
        assert!(state.fov.is_none());
    }

    #[test]
    fn test_non_finite_samples_are_ignored() {
        let mut track = line_track(LoopMode::Repeat);
        track.keyframes.values.position[3] = f32::NAN;
        let mut state = AnimState::from_track(&track).unwrap();
        state.position = Vec3::new(7.0, 8.0, 9.0);
        state.update(0.5);
        assert_eq!(state.position, Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_last_key_at_duration_gets_extra_frame() {
        let mut track = line_track(LoopMode::Repeat);
        track.keyframes.times = vec![0.0, 20.0];
        let state = AnimState::from_track(&track).unwrap();
        // Looped times: [-30, -10, 0, 20, 30, 50]
        assert_eq!(state.spline.times()[4], 30.0);
    }

    #[test]
    fn test_rotate_track_loops_back_to_start() {
        let track = create_rotate_track(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 60.0, 12, 20.0);
        let mut state = AnimState::from_track(&track).unwrap();
        state.update(0.0);
        let start = state.position;
        state.update(20.0);
        assert!((state.position - start).length() < 1e-3);
        state.update(10.0);
        assert!((state.position - Vec3::new(0.0, 0.0, -5.0)).length() < 0.1);
    }

    #[test]
    fn test_keys_past_duration_still_play() {
        let mut track = line_track(LoopMode::Repeat);
        track.frame_rate = 30.0;
        track.duration = 1.0;
        track.keyframes.times = vec![0.0, 30.0, 60.0];
        track.keyframes.values.position = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        track.keyframes.values.target = vec![0.0, 0.0, -1.0, 1.0, 0.0, -1.0, 2.0, 0.0, -1.0];
        track.keyframes.values.fov = vec![40.0, 50.0, 60.0];

        let mut state = AnimState::from_track(&track).unwrap();
        for _ in 0..40 {
            state.update(0.05);
            assert!(state.position.is_finite());
            assert!(state.target.is_finite());
            assert!(state.fov.unwrap().is_finite());
        }
    }

    #[test]
    fn test_empty_track_is_rejected() {
        let mut track = line_track(LoopMode::Repeat);
        track.keyframes.times.clear();
        assert!(matches!(AnimState::from_track(&track), Err(SplineError::Empty)));
    }
}
