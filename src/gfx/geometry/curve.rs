//! Smooth interpolating curve through captured points.
//!
//! A centripetal Catmull-Rom spline (alpha 0.5) passes through every control
//! point, never overshoots into cusps or self-intersections on uneven spacing,
//! and needs no tuning. Ends are open: the missing outer control points are
//! mirrored from the first and last segments.

use cgmath::{InnerSpace, Vector3};

/// Number of samples used to build the arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

const MIN_KNOT_INTERVAL: f32 = 1e-4;
const TANGENT_DELTA: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vector3<f32>>,
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Builds a curve through `points`. Returns `None` with fewer than two points.
    pub fn new(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let mut curve = Self {
            points: points.iter().map(|&p| Vector3::from(p)).collect(),
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths(ARC_LENGTH_DIVISIONS);
        Some(curve)
    }

    /// Approximate total length of the curve.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t`, spread evenly across segments.
    pub fn point(&self, t: f32) -> Vector3<f32> {
        let count = self.points.len();
        let scaled = (count - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = scaled.floor() as usize;
        let mut weight = scaled - segment as f32;

        if segment >= count - 1 {
            segment = count - 2;
            weight = 1.0;
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if segment + 2 < count {
            self.points[segment + 2]
        } else {
            p2 + (p2 - p1)
        };

        // Centripetal knot spacing: |p_i+1 - p_i|^0.5.
        let mut dt1 = (p2 - p1).magnitude2().powf(0.25);
        let mut dt0 = (p1 - p0).magnitude2().powf(0.25);
        let mut dt2 = (p3 - p2).magnitude2().powf(0.25);
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        Vector3::new(
            nonuniform_segment(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2, weight),
            nonuniform_segment(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2, weight),
            nonuniform_segment(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2, weight),
        )
    }

    /// Point at arc-length fraction `u`.
    pub fn point_at(&self, u: f32) -> Vector3<f32> {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at curve parameter `t`. Falls back to +X where the curve
    /// does not move.
    pub fn tangent(&self, t: f32) -> Vector3<f32> {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        let diff = self.point(t2) - self.point(t1);
        if diff.magnitude2() > f32::EPSILON * f32::EPSILON {
            diff.normalize()
        } else {
            Vector3::unit_x()
        }
    }

    /// Unit tangent at arc-length fraction `u`.
    pub fn tangent_at(&self, u: f32) -> Vector3<f32> {
        self.tangent(self.u_to_t(u))
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += (current - last).magnitude();
            lengths.push(sum);
            last = current;
        }

        lengths
    }

    /// Maps an arc-length fraction to the curve parameter covering that length.
    fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last_index = lengths.len() - 1;
        let target = u.clamp(0.0, 1.0) * self.length();

        // Last table entry not past the target.
        let i = lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(last_index - 1);

        let before = lengths[i];
        let segment_length = lengths[i + 1] - before;
        if segment_length <= f32::EPSILON {
            return i as f32 / last_index as f32;
        }

        let fraction = ((target - before) / segment_length).clamp(0.0, 1.0);
        (i as f32 + fraction) / last_index as f32
    }
}

/// Cubic Hermite segment between `x1` and `x2` with tangents scaled for
/// non-uniform knot intervals.
#[allow(clippy::too_many_arguments)]
fn nonuniform_segment(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32, t: f32) -> f32 {
    let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
    let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

    let c0 = x1;
    let c1 = t1;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2;
    let c3 = 2.0 * x1 - 2.0 * x2 + t1 + t2;

    ((c3 * t + c2) * t + c1) * t + c0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: [f32; 3]) -> bool {
        (a - Vector3::from(b)).magnitude() < 1e-4
    }

    #[test]
    fn needs_two_points() {
        assert!(CatmullRomCurve::new(&[]).is_none());
        assert!(CatmullRomCurve::new(&[[1.0, 2.0, 3.0]]).is_none());
        assert!(CatmullRomCurve::new(&[[0.0; 3], [1.0, 0.0, 0.0]]).is_some());
    }

    #[test]
    fn passes_through_control_points() {
        let points = [[0.0, 0.0, 0.0], [1.0, 2.0, 0.0], [3.0, 1.0, 1.0], [4.0, 0.0, 0.0]];
        let curve = CatmullRomCurve::new(&points).unwrap();

        assert!(close(curve.point(0.0), points[0]));
        assert!(close(curve.point(1.0 / 3.0), points[1]));
        assert!(close(curve.point(2.0 / 3.0), points[2]));
        assert!(close(curve.point(1.0), points[3]));
    }

    #[test]
    fn straight_line_has_straight_length_and_tangent() {
        let curve = CatmullRomCurve::new(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();

        assert!((curve.length() - 2.0).abs() < 1e-3);
        assert!(close(curve.point_at(0.5), [1.0, 0.0, 0.0]));
        assert!(close(curve.tangent_at(0.25), [1.0, 0.0, 0.0]));
    }

    #[test]
    fn arc_length_sampling_is_even_on_uneven_spacing() {
        let curve = CatmullRomCurve::new(&[[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [4.0, 0.0, 0.0]]).unwrap();
        let quarter = curve.point_at(0.25);
        assert!((quarter.x - 1.0).abs() < 0.05, "got {:?}", quarter);
    }

    #[test]
    fn coincident_points_fall_back_to_x_tangent() {
        let curve = CatmullRomCurve::new(&[[1.0, 1.0, 1.0]; 3]).unwrap();
        assert_eq!(curve.length(), 0.0);
        assert!(close(curve.point_at(0.7), [1.0, 1.0, 1.0]));
        assert_eq!(curve.tangent_at(0.5), Vector3::unit_x());
    }
}
