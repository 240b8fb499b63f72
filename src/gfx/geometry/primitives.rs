//! # Primitive Shape Generation
//!
//! Procedural meshes for every shape the demos place. All shapes are Y-up,
//! centred on the origin, and carry outward normals and texture coordinates.
//! Polyhedra are flat shaded: each face gets its own vertices.

use super::{GeometryData, LineGeometry};
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
pub fn generate_cube() -> GeometryData {
    generate_box(1.0, 1.0, 1.0)
}

/// Generate an axis-aligned box with the given extents.
///
/// Each face has its own four vertices so normals stay sharp at the edges.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut data = GeometryData::new();

    // (normal, u axis, v axis); corners are centre + u*±1 + v*±1.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let half = [hx, hy, hz];

    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut position = [0.0; 3];
            for axis in 0..3 {
                position[axis] = (normal[axis] + u[axis] * su + v[axis] * sv) * half[axis];
            }
            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
            data.tex_coords.push([long as f32 / long_segs as f32, lat as f32 / lat_segs as f32]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a torus around the Z axis.
///
/// # Arguments
/// * `radius` - Distance from the centre to the middle of the tube
/// * `tube` - Radius of the tube
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments around the ring
pub fn generate_torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * 2.0 * PI;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * 2.0 * PI;

            let ring = radius + tube * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
            let centre = [radius * u.cos(), radius * u.sin(), 0.0];

            data.vertices.push(position);
            data.normals.push(normalize([
                position[0] - centre[0],
                position[1] - centre[1],
                position[2] - centre[2],
            ]));
            data.tex_coords.push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = (tubular + 1) * j + i - 1;
            let b = (tubular + 1) * (j - 1) + i - 1;
            let c = (tubular + 1) * (j - 1) + i;
            let d = (tubular + 1) * j + i;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Generate a regular tetrahedron whose vertices sit on a sphere of `radius`.
pub fn generate_tetrahedron(radius: f32) -> GeometryData {
    let corners = [[1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [1.0, -1.0, -1.0]];
    let faces = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];
    flat_polyhedron(&corners, &faces, radius)
}

/// Generate a regular dodecahedron whose vertices sit on a sphere of `radius`.
pub fn generate_dodecahedron(radius: f32) -> GeometryData {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let r = 1.0 / t;

    let corners = [
        [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
        [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
        [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
        [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
    ];
    // Twelve pentagons, three triangles each.
    let faces = [
        3, 11, 7, 3, 7, 15, 3, 15, 13,
        7, 19, 17, 7, 17, 6, 7, 6, 15,
        17, 4, 8, 17, 8, 10, 17, 10, 6,
        8, 0, 16, 8, 16, 2, 8, 2, 10,
        0, 12, 1, 0, 1, 18, 0, 18, 16,
        6, 10, 2, 6, 2, 13, 6, 13, 15,
        2, 16, 18, 2, 18, 3, 2, 3, 13,
        18, 1, 9, 18, 9, 11, 18, 11, 3,
        4, 14, 12, 4, 12, 0, 4, 0, 8,
        11, 9, 5, 11, 5, 19, 11, 19, 7,
        19, 5, 14, 19, 14, 4, 19, 4, 17,
        1, 12, 14, 1, 14, 5, 1, 5, 9,
    ];
    flat_polyhedron(&corners, &faces, radius)
}

/// Generate an extruded star lying in XY, extruded along Z and centred on the origin.
///
/// Both caps are fans around the centre; the side walls are flat quads.
pub fn generate_star(points: u32, outer_radius: f32, inner_radius: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let points = points.max(3);
    let rim_count = points * 2;
    let half_depth = depth * 0.5;

    let rim: Vec<[f32; 2]> = (0..rim_count)
        .map(|i| {
            let angle = i as f32 * PI / points as f32 - PI / 2.0;
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            [angle.cos() * r, angle.sin() * r]
        })
        .collect();

    for (z, normal_z) in [(half_depth, 1.0), (-half_depth, -1.0)] {
        let centre = data.vertices.len() as u32;
        data.vertices.push([0.0, 0.0, z]);
        data.normals.push([0.0, 0.0, normal_z]);
        data.tex_coords.push([0.5, 0.5]);

        for p in &rim {
            data.vertices.push([p[0], p[1], z]);
            data.normals.push([0.0, 0.0, normal_z]);
            data.tex_coords.push([p[0] / (2.0 * outer_radius) + 0.5, p[1] / (2.0 * outer_radius) + 0.5]);
        }

        for i in 0..rim_count {
            let a = centre + 1 + i;
            let b = centre + 1 + (i + 1) % rim_count;
            if normal_z > 0.0 {
                data.indices.extend_from_slice(&[centre, a, b]);
            } else {
                data.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }

    for i in 0..rim_count as usize {
        let p = rim[i];
        let q = rim[(i + 1) % rim_count as usize];
        let normal = normalize([q[1] - p[1], p[0] - q[0], 0.0]);

        let base = data.vertices.len() as u32;
        for (corner, uv) in [
            ([p[0], p[1], half_depth], [0.0, 1.0]),
            ([p[0], p[1], -half_depth], [0.0, 0.0]),
            ([q[0], q[1], -half_depth], [1.0, 0.0]),
            ([q[0], q[1], half_depth], [1.0, 1.0]),
        ] {
            data.vertices.push(corner);
            data.normals.push(normal);
            data.tex_coords.push(uv);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a square grid of lines on the XZ plane.
///
/// The two lines through the origin use `centre_color`, all others `line_color`.
pub fn generate_grid(size: f32, divisions: u32, centre_color: [f32; 4], line_color: [f32; 4]) -> LineGeometry {
    let mut lines = LineGeometry::new();
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if 2 * i == divisions { centre_color } else { line_color };
        lines.push_segment([-half, 0.0, k], [half, 0.0, k], color);
        lines.push_segment([k, 0.0, -half], [k, 0.0, half], color);
    }

    lines
}

/// Builds flat-shaded triangles from a convex polyhedron centred on the origin.
///
/// Corners are projected onto a sphere of `radius`; faces are rewound where
/// needed so every normal points away from the centre.
fn flat_polyhedron(corners: &[[f32; 3]], faces: &[u32], radius: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let projected: Vec<[f32; 3]> = corners
        .iter()
        .map(|&c| scale(normalize(c), radius))
        .collect();

    for face in faces.chunks_exact(3) {
        let [mut a, b, mut c] = [
            projected[face[0] as usize],
            projected[face[1] as usize],
            projected[face[2] as usize],
        ];
        let mut normal = normalize(cross(sub(b, a), sub(c, a)));
        let centroid = [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0, (a[2] + b[2] + c[2]) / 3.0];
        if dot(normal, centroid) < 0.0 {
            std::mem::swap(&mut a, &mut c);
            normal = scale(normal, -1.0);
        }

        let base = data.vertices.len() as u32;
        for (corner, uv) in [(a, [0.0, 0.0]), (b, [1.0, 0.0]), (c, [0.5, 1.0])] {
            data.vertices.push(corner);
            data.normals.push(normal);
            data.tex_coords.push(uv);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    data
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn scale(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn normalize(a: [f32; 3]) -> [f32; 3] {
    let len = dot(a, a).sqrt();
    if len > f32::EPSILON {
        scale(a, 1.0 / len)
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(data: &GeometryData) {
        for tri in data.indices.chunks_exact(3) {
            let [a, b, c] = [
                data.vertices[tri[0] as usize],
                data.vertices[tri[1] as usize],
                data.vertices[tri[2] as usize],
            ];
            let centroid = [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0, (a[2] + b[2] + c[2]) / 3.0];
            let winding = cross(sub(b, a), sub(c, a));
            assert!(dot(winding, centroid) > 0.0, "inward face {:?}", tri);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.vertices.iter().flatten().all(|c| c.abs() == 0.5));
        assert_outward(&cube);
    }

    #[test]
    fn box_respects_extents() {
        let data = generate_box(2.0, 4.0, 6.0);
        let max_y = data.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_z = data.vertices.iter().map(|v| v[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 2.0);
        assert_eq!(min_z, -3.0);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 32, 32);
        assert_eq!(sphere.vertex_count(), 33 * 33);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        for v in &sphere.vertices {
            assert!((dot(*v, *v).sqrt() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn torus_counts_and_extent() {
        let torus = generate_torus(1.0, 0.5, 32, 100);
        assert_eq!(torus.vertex_count(), 33 * 101);
        assert_eq!(torus.triangle_count(), 32 * 100 * 2);
        let max_x = torus.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 1.5).abs() < 1e-4);
    }

    #[test]
    fn polyhedra_are_closed_and_outward() {
        let tetra = generate_tetrahedron(0.8);
        assert_eq!(tetra.triangle_count(), 4);
        assert_outward(&tetra);

        let dodeca = generate_dodecahedron(1.0);
        assert_eq!(dodeca.triangle_count(), 36);
        assert_outward(&dodeca);
        for v in &dodeca.vertices {
            assert!((dot(*v, *v).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn star_has_caps_and_walls() {
        let star = generate_star(5, 0.6, 0.3, 0.3);
        // Two fans of 10 triangles plus 10 wall quads.
        assert_eq!(star.triangle_count(), 2 * 10 + 10 * 2);
        let max_z = star.vertices.iter().map(|v| v[2]).fold(f32::MIN, f32::max);
        assert!((max_z - 0.15).abs() < 1e-6);
        let top = star.vertices[1];
        assert!((top[1] + 0.6).abs() < 1e-6);
    }

    #[test]
    fn grid_highlights_centre_lines() {
        let centre = [0.4, 0.4, 0.4, 1.0];
        let other = [0.6, 0.6, 0.6, 1.0];
        let grid = generate_grid(100.0, 100, centre, other);

        assert_eq!(grid.vertices.len(), 101 * 2 * 2);
        let centre_vertices = grid.vertices.iter().filter(|v| v.color == centre).count();
        assert_eq!(centre_vertices, 4);
    }
}
