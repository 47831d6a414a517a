//! Centripetal Catmull-Rom curve through a list of control points.
//!
//! Evaluation follows the non-uniform Catmull-Rom form with knot spacing
//! `|p(i+1) - p(i)|^0.5`, which avoids cusps and self-intersections on the
//! tightly wound ribbon helix. Open curves extrapolate a phantom point past
//! each end.

use crate::error::{ProcgenError, Result};
use glam::Vec3;

/// Arc-length lookup resolution used by the `*_uniform` accessors.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Knot spacings shorter than this collapse to a neighbour's spacing.
const MIN_KNOT: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    closed: bool,
    /// Cumulative chord lengths at `ARC_LENGTH_DIVISIONS + 1` evenly spaced t.
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    pub fn new(points: Vec<Vec3>, closed: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(ProcgenError::TooFewControlPoints(points.len()));
        }
        for p in &points {
            crate::error::ensure_finite("curve control point", p.x)?;
            crate::error::ensure_finite("curve control point", p.y)?;
            crate::error::ensure_finite("curve control point", p.z)?;
        }
        let mut curve = Self {
            points,
            closed,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths(ARC_LENGTH_DIVISIONS);
        Ok(curve)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point at curve parameter `t` in `[0, 1]`. Parameter spacing follows the
    /// control points, not arc length.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();
        let t = t.clamp(0.0, 1.0);

        let p = (l - usize::from(!self.closed)) as f32 * t;
        let mut int_point = p.floor() as usize;
        let mut weight = p - int_point as f32;

        if self.closed {
            int_point %= l;
        } else if int_point >= l - 1 {
            int_point = l - 2;
            weight = 1.0;
        }

        let p0 = if self.closed || int_point > 0 {
            points[(int_point + l - 1) % l]
        } else {
            // extrapolate before the first point
            points[0] * 2.0 - points[1]
        };
        let p1 = points[int_point % l];
        let p2 = points[(int_point + 1) % l];
        let p3 = if self.closed || int_point + 2 < l {
            points[(int_point + 2) % l]
        } else {
            // extrapolate past the last point
            points[l - 1] * 2.0 - points[l - 2]
        };

        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < MIN_KNOT {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT {
            dt2 = dt1;
        }

        let mut t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let mut t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        t1 *= dt1;
        t2 *= dt1;

        hermite(p1, p2, t1, t2, weight)
    }

    /// Unit tangent at curve parameter `t`, by central difference.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let delta = 1e-4;
        let t1 = (t - delta).max(0.0);
        let t2 = (t + delta).min(1.0);
        (self.point_at(t2) - self.point_at(t1)).normalize_or_zero()
    }

    /// Total length of the curve, approximated by chords.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Map an arc-length fraction `u` in `[0, 1]` to the curve parameter `t`.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // last index whose cumulative length is <= target
        let i = lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(lengths.len() - 2);

        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        (i as f32 + fraction) / (lengths.len() - 1) as f32
    }

    /// Point at arc-length fraction `u`: equal steps in `u` are equal distances along the curve.
    pub fn point_at_uniform(&self, u: f32) -> Vec3 {
        self.point_at(self.u_to_t(u))
    }

    pub fn tangent_at_uniform(&self, u: f32) -> Vec3 {
        self.tangent_at(self.u_to_t(u))
    }

    /// `divisions + 1` points evenly spaced in curve parameter.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point_at(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point_at(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

/// Cubic Hermite segment from `p1` to `p2` with end tangents `t1`, `t2`.
fn hermite(p1: Vec3, p2: Vec3, t1: Vec3, t2: Vec3, w: f32) -> Vec3 {
    let c0 = p1;
    let c1 = t1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2;
    let c3 = 2.0 * p1 - 2.0 * p2 + t1 + t2;
    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{spiral_curve_points, SpiralParams};

    fn line() -> CatmullRomCurve {
        CatmullRomCurve::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
            false,
        )
        .unwrap()
    }

    #[test]
    fn open_curve_hits_its_endpoints() {
        let points = spiral_curve_points(&SpiralParams::RIBBON).unwrap();
        let curve = CatmullRomCurve::new(points.clone(), false).unwrap();
        assert!(curve.point_at(0.0).distance(points[0]) < 1e-5);
        assert!(curve.point_at(1.0).distance(*points.last().unwrap()) < 1e-4);
    }

    #[test]
    fn curve_passes_through_interior_control_points() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(3.0, 2.0, 0.0),
        ];
        let curve = CatmullRomCurve::new(points.clone(), false).unwrap();
        for (i, p) in points.iter().enumerate() {
            let t = i as f32 / (points.len() - 1) as f32;
            assert!(curve.point_at(t).distance(*p) < 1e-4, "missed control point {i}");
        }
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let curve = line();
        for i in 0..=10 {
            let p = curve.point_at(i as f32 / 10.0);
            assert!(p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
        }
        assert!((curve.length() - 2.0).abs() < 1e-3);
        assert!(curve.tangent_at(0.5).distance(Vec3::X) < 1e-3);
    }

    #[test]
    fn uniform_parameter_is_monotonic_in_arc_length() {
        let points = spiral_curve_points(&SpiralParams::RIBBON).unwrap();
        let curve = CatmullRomCurve::new(points, false).unwrap();
        let mut last = -1.0;
        for i in 0..=50 {
            let t = curve.u_to_t(i as f32 / 50.0);
            assert!(t >= last);
            last = t;
        }
        assert!((curve.u_to_t(1.0) - 1.0).abs() < 1e-4);
        assert_eq!(curve.u_to_t(0.0), 0.0);
    }

    #[test]
    fn closed_curve_wraps_around() {
        let square = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let curve = CatmullRomCurve::new(square.clone(), true).unwrap();
        assert!(curve.point_at(0.0).distance(square[0]) < 1e-5);
        assert!(curve.point_at(1.0).distance(square[0]) < 1e-4);
    }

    #[test]
    fn rejects_single_point() {
        assert_eq!(
            CatmullRomCurve::new(vec![Vec3::ZERO], false).unwrap_err(),
            ProcgenError::TooFewControlPoints(1)
        );
    }
}
