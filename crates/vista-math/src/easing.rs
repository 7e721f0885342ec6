//! Easing, damping and small scalar helpers used by camera blending.

use serde::{Deserialize, Serialize};

/// Exponential ease-out normalised so that `ease_out(0) == 0` and
/// `ease_out(1) == 1`.
pub fn ease_out(x: f32) -> f32 {
    (1.0 - 2.0_f32.powf(-10.0 * x)) / (1.0 - 2.0_f32.powf(-10.0))
}

/// Frame-rate independent damping factor.
///
/// `damping` is the fraction of the remaining distance retained per
/// millisecond (0 < damping < 1). Returns the blend weight to apply for a
/// step of `dt` seconds.
pub fn damp(damping: f32, dt: f32) -> f32 {
    1.0 - damping.powf(dt * 1000.0)
}

/// Euclidean modulo: the result always has the sign of `m`.
pub fn modulo(n: f32, m: f32) -> f32 {
    ((n % m) + m) % m
}

/// True when every pair of components differs by less than `epsilon`.
pub fn nearly_equals(a: &[f32], b: &[f32], epsilon: f32) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < epsilon)
}

/// Easing curves for camera transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingFunction {
    /// Constant speed, no acceleration.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end (quadratic).
    EaseOut,
    /// Slow start, fast middle, slow end.
    EaseInOut,
    /// Exponential ease-out, see [`ease_out`].
    #[default]
    ExpoOut,
}

impl EasingFunction {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::ExpoOut => ease_out(t),
        }
    }
}
