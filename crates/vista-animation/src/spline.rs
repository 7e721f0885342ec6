//! Cubic Hermite spline over keyframed control points.
//!
//! Each control point stores one knot per channel: `[tangent_in, value,
//! tangent_out]`. Tangents are pre-scaled to the normalized `[0, 1]`
//! parameter of the adjacent segment, so segment evaluation needs no
//! knowledge of the control times.

/// Errors raised when building a spline from malformed control data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    /// No control times were supplied.
    #[error("spline has no control points")]
    Empty,

    /// The knot buffer is not a whole number of `[in, value, out]` triples
    /// per control time.
    #[error("knot count {knots} is not a multiple of 3 x {times} control times")]
    KnotCountMismatch { knots: usize, times: usize },

    /// The point buffer does not hold the same number of channels per time.
    #[error("point count {points} is not a multiple of {times} control times")]
    PointCountMismatch { points: usize, times: usize },

    /// Control times must be strictly increasing.
    #[error("control times are not strictly increasing at index {index}")]
    NonMonotonic { index: usize },
}

/// An immutable multi-channel cubic spline.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    times: Vec<f32>,
    knots: Vec<f32>,
    dim: usize,
}

impl CubicSpline {
    /// Build a spline from control times and pre-computed knots.
    ///
    /// Invariant: `knots.len() == times.len() * dim * 3`.
    pub fn new(times: Vec<f32>, knots: Vec<f32>) -> Result<Self, SplineError> {
        check_increasing(&times)?;
        Self::build(times, knots)
    }

    /// Shape checks only. Loop padding may place seam times out of order
    /// when a key lies past the loop length, and evaluation tolerates that.
    fn build(times: Vec<f32>, knots: Vec<f32>) -> Result<Self, SplineError> {
        if times.is_empty() {
            return Err(SplineError::Empty);
        }
        if knots.len() % (times.len() * 3) != 0 {
            return Err(SplineError::KnotCountMismatch {
                knots: knots.len(),
                times: times.len(),
            });
        }
        let dim = knots.len() / times.len() / 3;
        Ok(Self { times, knots, dim })
    }

    /// Number of interpolated channels.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn knots(&self) -> &[f32] {
        &self.knots
    }

    /// Evaluate all channels at `time`, writing `dim` values into `result`.
    ///
    /// Times outside the control range clamp to the first or last control
    /// value.
    pub fn evaluate(&self, time: f32, result: &mut [f32]) {
        let last = self.times.len() - 1;
        if time <= self.times[0] {
            self.knot_value(0, result);
        } else if time >= self.times[last] {
            self.knot_value(last, result);
        } else {
            let mut seg = 0;
            while time >= self.times[seg + 1] {
                seg += 1;
            }
            let t = (time - self.times[seg]) / (self.times[seg + 1] - self.times[seg]);
            self.evaluate_segment(seg, t, result);
        }
    }

    /// Copy the control values at `index` into `result`.
    pub fn knot_value(&self, index: usize, result: &mut [f32]) {
        let base = index * 3 * self.dim;
        for (i, out) in result.iter_mut().take(self.dim).enumerate() {
            *out = self.knots[base + i * 3 + 1];
        }
    }

    /// Evaluate segment `segment` at normalized parameter `t` in `[0, 1]`.
    pub fn evaluate_segment(&self, segment: usize, t: f32, result: &mut [f32]) {
        let dim = self.dim;
        let t2 = t * t;
        let twot = t + t;
        let omt = 1.0 - t;
        let omt2 = omt * omt;

        let mut idx = segment * dim * 3;
        for out in result.iter_mut().take(dim) {
            let p0 = self.knots[idx + 1];
            let m0 = self.knots[idx + 2];
            let m1 = self.knots[idx + dim * 3];
            let p1 = self.knots[idx + dim * 3 + 1];
            idx += 3;

            *out = p0 * ((1.0 + twot) * omt2)
                + m0 * (t * omt2)
                + p1 * (t2 * (3.0 - twot))
                + m1 * (t2 * (t - 1.0));
        }
    }

    /// Derive `[in, value, out]` knots for each control point.
    ///
    /// Tangents come from centered finite differences (one-sided at the
    /// ends), scaled by `smoothness` (0 = linear, 1 = smooth) and by the
    /// duration of the adjacent segment.
    pub fn calc_knots(times: &[f32], points: &[f32], smoothness: f32) -> Vec<f32> {
        let n = times.len();
        if n == 0 {
            return Vec::new();
        }
        let dim = points.len() / n;
        let mut knots = vec![0.0; n * dim * 3];

        for i in 0..n {
            let t = times[i];
            for j in 0..dim {
                let idx = i * dim + j;
                let p = points[idx];

                let tangent = if n == 1 {
                    0.0
                } else if i == 0 {
                    slope(points[idx + dim] - p, times[i + 1] - t)
                } else if i == n - 1 {
                    slope(p - points[idx - dim], t - times[i - 1])
                } else {
                    slope(points[idx + dim] - points[idx - dim], times[i + 1] - times[i - 1])
                };

                let (in_scale, out_scale) = if n == 1 {
                    (0.0, 0.0)
                } else {
                    let in_scale = if i > 0 {
                        times[i] - times[i - 1]
                    } else {
                        times[1] - times[0]
                    };
                    let out_scale = if i < n - 1 {
                        times[i + 1] - times[i]
                    } else {
                        times[i] - times[i - 1]
                    };
                    (in_scale, out_scale)
                };

                knots[idx * 3] = tangent * in_scale * smoothness;
                knots[idx * 3 + 1] = p;
                knots[idx * 3 + 2] = tangent * out_scale * smoothness;
            }
        }
        knots
    }

    /// Build a spline passing through `points` (flattened, `dim` values per
    /// time).
    pub fn from_points(
        times: &[f32],
        points: &[f32],
        smoothness: f32,
    ) -> Result<Self, SplineError> {
        if times.is_empty() {
            return Err(SplineError::Empty);
        }
        if points.len() % times.len() != 0 {
            return Err(SplineError::PointCountMismatch {
                points: points.len(),
                times: times.len(),
            });
        }
        Self::new(times.to_vec(), Self::calc_knots(times, points, smoothness))
    }

    /// Build a spline that loops seamlessly over `[0, length]`.
    ///
    /// The first two points are appended at `length + times[0..2]` and the
    /// last two prepended at `times[n-2..n] - length`, so the tangents at the
    /// seam match on both sides.
    pub fn from_points_looping(
        length: f32,
        times: &[f32],
        points: &[f32],
        smoothness: f32,
    ) -> Result<Self, SplineError> {
        if times.len() < 2 {
            return Self::from_points(times, points, smoothness);
        }
        if points.len() % times.len() != 0 {
            return Err(SplineError::PointCountMismatch {
                points: points.len(),
                times: times.len(),
            });
        }
        check_increasing(times)?;
        let n = times.len();
        let dim = points.len() / n;

        let mut new_times = Vec::with_capacity(n + 4);
        new_times.push(times[n - 2] - length);
        new_times.push(times[n - 1] - length);
        new_times.extend_from_slice(times);
        new_times.push(length + times[0]);
        new_times.push(length + times[1]);

        let mut new_points = Vec::with_capacity(points.len() + dim * 4);
        new_points.extend_from_slice(&points[points.len() - dim * 2..]);
        new_points.extend_from_slice(points);
        new_points.extend_from_slice(&points[..dim * 2]);

        let knots = Self::calc_knots(&new_times, &new_points, smoothness);
        Self::build(new_times, knots)
    }
}

fn check_increasing(times: &[f32]) -> Result<(), SplineError> {
    match times.windows(2).position(|w| w[1] <= w[0]) {
        Some(index) => Err(SplineError::NonMonotonic { index: index + 1 }),
        None => Ok(()),
    }
}

/// Finite difference that flattens instead of dividing by a non-positive span.
fn slope(dp: f32, dt: f32) -> f32 {
    if dt > 0.0 { dp / dt } else { 0.0 }
}
