//! Tube surfaces swept along a curve, used to render drawn lines.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix3, Rad, Vector3};

use super::curve::CatmullRomCurve;
use super::GeometryData;
use crate::config::CanvasConfig;

const PARALLEL_EPSILON: f32 = 1e-4;

/// Rotation-minimising frame at one sample along the curve.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub tangent: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub binormal: Vector3<f32>,
}

#[derive(Debug, Clone)]
pub struct TubeGeometry {
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub radius: f32,
    pub closed: bool,
    pub data: GeometryData,
}

impl TubeGeometry {
    pub fn new(
        curve: &CatmullRomCurve,
        tubular_segments: u32,
        radius: f32,
        radial_segments: u32,
        closed: bool,
    ) -> Self {
        let tubular_segments = tubular_segments.max(1);
        let radial_segments = radial_segments.max(3);
        let frames = parallel_transport_frames(curve, tubular_segments, closed);

        let ring = radial_segments as usize + 1;
        let vertex_count = (tubular_segments as usize + 1) * ring;
        let mut data = GeometryData::new();
        data.vertices.reserve(vertex_count);
        data.normals.reserve(vertex_count);
        data.tex_coords.reserve(vertex_count);

        for i in 0..=tubular_segments {
            // A closed tube reuses the first ring so the seam matches exactly.
            let sample = if closed && i == tubular_segments { 0 } else { i };
            let center = curve.point_at(sample as f32 / tubular_segments as f32);
            let frame = frames[sample as usize];

            for j in 0..=radial_segments {
                let angle = j as f32 / radial_segments as f32 * 2.0 * PI;
                let (sin, cos) = (angle.sin(), -angle.cos());
                let normal = (frame.normal * cos + frame.binormal * sin).normalize();
                let position = center + normal * radius;

                data.vertices.push(position.into());
                data.normals.push(normal.into());
                data.tex_coords.push([
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ]);
            }
        }

        let ring = ring as u32;
        data.indices.reserve((tubular_segments * radial_segments * 6) as usize);
        for j in 1..=tubular_segments {
            for i in 1..=radial_segments {
                let a = ring * (j - 1) + (i - 1);
                let b = ring * j + (i - 1);
                let c = ring * j + i;
                let d = ring * (j - 1) + i;

                data.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            tubular_segments,
            radial_segments,
            radius,
            closed,
            data,
        }
    }
}

/// Samples `segments + 1` frames whose normals are carried along the curve by
/// the smallest rotation between consecutive tangents.
pub fn parallel_transport_frames(curve: &CatmullRomCurve, segments: u32, closed: bool) -> Vec<Frame> {
    let tangents: Vec<Vector3<f32>> = (0..=segments)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let first = tangents[0];
    let seed = least_aligned_axis(first);
    let side = first.cross(seed).normalize();
    let normal = first.cross(side);
    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame {
        tangent: first,
        normal,
        binormal: first.cross(normal),
    });

    for i in 1..tangents.len() {
        let previous = frames[i - 1];
        let tangent = tangents[i];
        let mut normal = previous.normal;

        let axis = previous.tangent.cross(tangent);
        if axis.magnitude() > PARALLEL_EPSILON {
            let theta = previous.tangent.dot(tangent).clamp(-1.0, 1.0).acos();
            normal = Matrix3::from_axis_angle(axis.normalize(), Rad(theta)) * normal;
        }

        frames.push(Frame {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        });
    }

    if closed {
        // Spread the twist between the first and last frame over the whole tube.
        let last = frames[segments as usize];
        let mut theta = frames[0].normal.dot(last.normal).clamp(-1.0, 1.0).acos() / segments as f32;
        if frames[0].tangent.dot(frames[0].normal.cross(last.normal)) > 0.0 {
            theta = -theta;
        }

        for (i, frame) in frames.iter_mut().enumerate().skip(1) {
            let rotation = Matrix3::from_axis_angle(frame.tangent, Rad(theta * i as f32));
            frame.normal = rotation * frame.normal;
            frame.binormal = frame.tangent.cross(frame.normal);
        }
    }

    frames
}

/// Unit axis least parallel to `v`, used to seed the first normal.
fn least_aligned_axis(v: Vector3<f32>) -> Vector3<f32> {
    let (x, y, z) = (v.x.abs(), v.y.abs(), v.z.abs());
    if x <= y && x <= z {
        Vector3::unit_x()
    } else if y <= z {
        Vector3::unit_y()
    } else {
        Vector3::unit_z()
    }
}

/// Tube mesh for a drawn line, or `None` when the line has fewer than two points.
///
/// The tube has `max(min_tube_segments, 2 * points)` segments along its length,
/// a radius of `thickness / thickness_scale` and open ends.
pub fn build_line_tube(points: &[[f32; 3]], thickness: f32, config: &CanvasConfig) -> Option<TubeGeometry> {
    let curve = CatmullRomCurve::new(points)?;
    let segments = config
        .min_tube_segments
        .max(2 * points.len() as u32);
    let radius = thickness / config.thickness_scale;

    Some(TubeGeometry::new(
        &curve,
        segments,
        radius,
        config.tube_radial_segments,
        false,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line() -> Vec<[f32; 3]> {
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]
    }

    #[test]
    fn straight_line_tube_matches_slider_thickness() {
        let tube = build_line_tube(&straight_line(), 2.0, &CanvasConfig::default()).unwrap();

        assert!((tube.radius - 0.04).abs() < 1e-6);
        assert!(tube.tubular_segments >= 32);
        assert_eq!(tube.radial_segments, 8);
        assert!(!tube.closed);

        // Open tube: exactly one ring per sample and no cap centres.
        assert_eq!(tube.data.vertex_count(), (32 + 1) * (8 + 1));
        assert_eq!(tube.data.triangle_count(), 32 * 8 * 2);
    }

    #[test]
    fn every_vertex_sits_on_the_tube_surface() {
        let tube = build_line_tube(&straight_line(), 2.0, &CanvasConfig::default()).unwrap();
        for v in &tube.data.vertices {
            let off_axis = (v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((off_axis - 0.04).abs() < 1e-4, "vertex {:?}", v);
            assert!(v[0] >= -1e-4 && v[0] <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn long_lines_get_more_segments() {
        let points: Vec<[f32; 3]> = (0..40).map(|i| [i as f32, 0.0, (i as f32 * 0.3).sin()]).collect();
        let tube = build_line_tube(&points, 1.0, &CanvasConfig::default()).unwrap();
        assert_eq!(tube.tubular_segments, 80);
    }

    #[test]
    fn single_point_yields_nothing() {
        assert!(build_line_tube(&[[0.0, 0.0, 0.0]], 2.0, &CanvasConfig::default()).is_none());
        assert!(build_line_tube(&[], 2.0, &CanvasConfig::default()).is_none());
    }

    #[test]
    fn coincident_points_produce_finite_geometry() {
        let tube = build_line_tube(&[[3.0, 0.0, 3.0]; 4], 2.0, &CanvasConfig::default()).unwrap();
        assert!(tube
            .data
            .vertices
            .iter()
            .chain(tube.data.normals.iter())
            .all(|v| v.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn frames_stay_orthonormal_on_a_bend() {
        let curve = CatmullRomCurve::new(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
        ])
        .unwrap();

        for frame in parallel_transport_frames(&curve, 64, false) {
            assert!((frame.normal.magnitude() - 1.0).abs() < 1e-3);
            assert!(frame.normal.dot(frame.tangent).abs() < 1e-3);
            assert!(frame.binormal.dot(frame.tangent).abs() < 1e-3);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let tube = build_line_tube(&straight_line(), 5.0, &CanvasConfig::default()).unwrap();
        let count = tube.data.vertex_count() as u32;
        assert!(tube.data.indices.iter().all(|&i| i < count));
    }
}
